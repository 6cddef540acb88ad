use super::*;

// =========================================================
// Helpers
// =========================================================

fn make_user(id: u64) -> User {
    User {
        id,
        name: format!("User {}", id),
        email: format!("user{}@example.com", id),
        role: "user".to_string(),
        active: true,
        last_login: None,
    }
}

fn make_page(ids: &[u64], total_pages: u32, total_users: u64) -> UserPage {
    UserPage {
        users: ids.iter().copied().map(make_user).collect(),
        total_pages,
        total_users,
    }
}

/// A state that has loaded `ids` as the given page of the collection.
fn ready_state(ids: &[u64], page: u32, total_pages: u32, total_users: u64) -> ListState {
    let mut state = ListState::new();
    state.query.page = page;
    let stamp = state.begin();
    let applied = state.apply(&stamp, Ok(make_page(ids, total_pages, total_users)));
    assert!(applied);
    state
}

fn fetch_error() -> ApiError {
    ApiError::http(500, "boom")
}

// =========================================================
// Phases
// =========================================================

#[test]
fn test_initial_state_is_loading_and_empty() {
    let state = ListState::new();
    assert_eq!(state.phase(), ListPhase::Loading);
    assert!(state.rows().is_empty());
    assert_eq!(state.total_pages(), 0);
    assert_eq!(state.query().page, 1);
}

#[test]
fn test_begin_then_apply_reaches_ready() {
    let mut state = ListState::new();
    let stamp = state.begin();
    assert_eq!(state.phase(), ListPhase::Loading);

    assert!(state.apply(&stamp, Ok(make_page(&[1, 2], 1, 2))));

    assert_eq!(state.phase(), ListPhase::Ready);
    assert_eq!(state.rows().len(), 2);
    assert_eq!(state.total_users(), 2);
}

#[test]
fn test_failure_keeps_last_result() {
    let mut state = ready_state(&[1, 2, 3], 1, 2, 13);

    let stamp = state.begin();
    assert!(state.apply(&stamp, Err(fetch_error())));

    assert_eq!(state.phase(), ListPhase::Error);
    assert_eq!(state.error(), Some("boom"));
    // the stale-but-valid rows stay visible
    assert_eq!(state.rows().len(), 3);
    assert_eq!(state.total_users(), 13);
}

#[test]
fn test_success_after_failure_clears_error() {
    let mut state = ready_state(&[1], 1, 1, 1);
    let stamp = state.begin();
    state.apply(&stamp, Err(fetch_error()));

    let stamp = state.begin();
    assert!(state.apply(&stamp, Ok(make_page(&[1, 2], 1, 2))));

    assert_eq!(state.phase(), ListPhase::Ready);
    assert_eq!(state.error(), None);
}

// =========================================================
// Query operations
// =========================================================

#[test]
fn test_set_page_within_bounds() {
    let mut state = ready_state(&[1, 2], 1, 5, 42);

    let stamp = state.set_page(3).expect("in-range page should refetch");

    assert_eq!(stamp.query.page, 3);
    assert_eq!(state.query().page, 3);
    assert_eq!(state.phase(), ListPhase::Loading);
}

#[test]
fn test_set_page_out_of_bounds_is_noop() {
    let mut state = ready_state(&[1, 2], 2, 3, 25);

    assert!(state.set_page(0).is_none());
    assert!(state.set_page(4).is_none());
    assert!(state.set_page(2).is_none()); // already there

    assert_eq!(state.query().page, 2);
    assert_eq!(state.phase(), ListPhase::Ready);
}

#[test]
fn test_set_page_before_first_result_is_noop() {
    let mut state = ListState::new();
    assert!(state.set_page(2).is_none());
}

#[test]
fn test_set_sort_same_field_flips_direction() {
    let mut state = ready_state(&[1], 1, 1, 1);
    assert_eq!(state.query().sort_order, SortDirection::Asc);

    state.set_sort(DEFAULT_SORT_FIELD);
    assert_eq!(state.query().sort_order, SortDirection::Desc);

    // toggling twice restores the original ordering
    state.set_sort(DEFAULT_SORT_FIELD);
    assert_eq!(state.query().sort_order, SortDirection::Asc);
    assert_eq!(state.query().sort_by, DEFAULT_SORT_FIELD);
}

#[test]
fn test_set_sort_new_field_starts_ascending() {
    let mut state = ready_state(&[1], 3, 4, 38);
    state.set_sort(DEFAULT_SORT_FIELD); // now name desc

    let stamp = state.set_sort("email");

    assert_eq!(stamp.query.sort_by, "email");
    assert_eq!(stamp.query.sort_order, SortDirection::Asc);
    assert_eq!(stamp.query.page, 1);
}

#[test]
fn test_sort_and_search_reset_page() {
    let mut state = ready_state(&[1], 3, 5, 50);

    let stamp = state.set_sort("email");
    assert_eq!(stamp.query.page, 1);

    let mut state = ready_state(&[1], 3, 5, 50);
    let stamp = state.set_search("ada");
    assert_eq!(stamp.query.page, 1);
    assert_eq!(stamp.query.search, "ada");

    let mut state = ready_state(&[1], 3, 5, 50);
    let stamp = state.set_filter("active", "true");
    assert_eq!(stamp.query.page, 1);
}

#[test]
fn test_set_filter_replaces_and_clears() {
    let mut state = ready_state(&[1], 1, 1, 1);

    state.set_filter("roles", "admin");
    assert_eq!(state.query().filters.get("roles").map(String::as_str), Some("admin"));

    state.set_filter("roles", "user");
    assert_eq!(state.query().filters.get("roles").map(String::as_str), Some("user"));

    state.set_filter("roles", "");
    assert!(!state.query().filters.contains_key("roles"));
}

// =========================================================
// Stale responses
// =========================================================

#[test]
fn test_stale_response_discarded_when_arriving_late() {
    let mut state = ListState::new();
    let first = state.begin();
    let second = state.set_search("alpha");

    // newest answer lands first
    assert!(state.apply(&second, Ok(make_page(&[2], 1, 1))));
    // the superseded one completes afterwards and must be dropped
    assert!(!state.apply(&first, Ok(make_page(&[1], 9, 99))));

    assert_eq!(state.rows()[0].id, 2);
    assert_eq!(state.total_pages(), 1);
    assert_eq!(state.phase(), ListPhase::Ready);
}

#[test]
fn test_stale_response_discarded_in_issue_order() {
    let mut state = ListState::new();
    let first = state.begin();
    let second = state.set_search("alpha");

    assert!(!state.apply(&first, Ok(make_page(&[1], 9, 99))));
    // still loading: the pending query has not answered yet
    assert_eq!(state.phase(), ListPhase::Loading);
    assert!(state.rows().is_empty());

    assert!(state.apply(&second, Ok(make_page(&[2], 1, 1))));
    assert_eq!(state.rows()[0].id, 2);
}

#[test]
fn test_stale_error_does_not_disturb_newer_result() {
    let mut state = ListState::new();
    let first = state.begin();
    let second = state.begin();

    assert!(state.apply(&second, Ok(make_page(&[7], 1, 1))));
    assert!(!state.apply(&first, Err(fetch_error())));

    assert_eq!(state.phase(), ListPhase::Ready);
    assert_eq!(state.error(), None);
}

// =========================================================
// Delete rebalancing
// =========================================================

#[test]
fn test_remove_row_updates_totals_in_place() {
    let mut state = ready_state(&[1, 2, 3], 1, 3, 25);

    let stamp = state.remove_row(2);

    assert!(stamp.is_none());
    assert_eq!(state.rows().len(), 2);
    assert_eq!(state.total_users(), 24);
    assert_eq!(state.total_pages(), 3); // ceil(24 / 10)
    assert_eq!(state.phase(), ListPhase::Ready);
}

#[test]
fn test_remove_last_row_of_last_page_steps_back() {
    // page 3 of 3 holding the final record of 21
    let mut state = ready_state(&[21], 3, 3, 21);

    let stamp = state.remove_row(21).expect("emptied page must refetch");

    assert_eq!(state.query().page, 2);
    assert_eq!(stamp.query.page, 2);
    assert_eq!(state.total_users(), 20);
    assert_eq!(state.total_pages(), 2);

    // the refetch settles like any other fetch
    assert!(state.apply(&stamp, Ok(make_page(&[11, 12], 2, 20))));
    assert_eq!(state.phase(), ListPhase::Ready);
    assert_eq!(state.rows().len(), 2);
}

#[test]
fn test_remove_last_row_of_first_page_stays() {
    let mut state = ready_state(&[1], 1, 1, 1);

    let stamp = state.remove_row(1);

    assert!(stamp.is_none());
    assert_eq!(state.query().page, 1);
    assert!(state.rows().is_empty());
    assert_eq!(state.total_users(), 0);
    assert_eq!(state.total_pages(), 0);
}

#[test]
fn test_remove_unknown_id_is_noop() {
    let mut state = ready_state(&[1, 2], 1, 1, 2);

    let stamp = state.remove_row(99);

    assert!(stamp.is_none());
    assert_eq!(state.rows().len(), 2);
    assert_eq!(state.total_users(), 2);
}

// =========================================================
// Wire parameters
// =========================================================

#[test]
fn test_to_params_canonical_order() {
    let query = ListQuery::default();
    let params = query.to_params();

    assert_eq!(
        params,
        vec![
            ("page".to_string(), "1".to_string()),
            ("pageSize".to_string(), "10".to_string()),
            ("sortBy".to_string(), "name".to_string()),
            ("sortOrder".to_string(), "asc".to_string()),
        ]
    );
}

#[test]
fn test_to_params_includes_search_and_filters() {
    let mut state = ListState::new();
    state.set_search("ada");
    state.set_filter("roles", "admin");
    state.set_filter("active", "true");
    let params = state.query().to_params();

    assert_eq!(
        params,
        vec![
            ("page".to_string(), "1".to_string()),
            ("pageSize".to_string(), "10".to_string()),
            ("sortBy".to_string(), "name".to_string()),
            ("sortOrder".to_string(), "asc".to_string()),
            ("search".to_string(), "ada".to_string()),
            ("active".to_string(), "true".to_string()),
            ("roles".to_string(), "admin".to_string()),
        ]
    );
}

#[test]
fn test_total_pages_for_rounding() {
    assert_eq!(total_pages_for(0, 10), 0);
    assert_eq!(total_pages_for(1, 10), 1);
    assert_eq!(total_pages_for(10, 10), 1);
    assert_eq!(total_pages_for(11, 10), 2);
    assert_eq!(total_pages_for(21, 10), 3);
}
