//! Pagination footer for the users table.

use leptos::prelude::*;

use crate::components::icons::{ChevronLeft, ChevronRight};

/// Record range for the footer line, 1-based inclusive.
fn range_text(page: u32, page_size: u32, total: u64) -> String {
    if total == 0 {
        return "Showing 0 to 0 of 0 records".to_string();
    }
    let page = u64::from(page);
    let size = u64::from(page_size);
    let start = (page - 1) * size + 1;
    let end = (page * size).min(total);
    format!("Showing {} to {} of {} records", start, end, total)
}

#[component]
pub fn Pagination(
    current_page: Signal<u32>,
    total_pages: Signal<u32>,
    total_records: Signal<u64>,
    page_size: u32,
    #[prop(into)] on_page: Callback<u32>,
) -> impl IntoView {
    let range = move || range_text(current_page.get(), page_size, total_records.get());

    view! {
        <div class="flex flex-col md:flex-row justify-between items-center gap-4 p-4">
            <div class="text-sm text-base-content/70">{range}</div>

            <div class="join">
                <button
                    class="join-item btn btn-sm"
                    disabled=move || current_page.get() <= 1
                    on:click=move |_| on_page.run(current_page.get() - 1)
                >
                    <ChevronLeft attr:class="h-4 w-4" />
                </button>
                <For
                    each=move || 1..=total_pages.get()
                    key=|page| *page
                    children=move |page| {
                        view! {
                            <button
                                class="join-item btn btn-sm"
                                class:btn-active=move || current_page.get() == page
                                on:click=move |_| on_page.run(page)
                            >
                                {page}
                            </button>
                        }
                    }
                />
                <button
                    class="join-item btn btn-sm"
                    disabled=move || current_page.get() >= total_pages.get()
                    on:click=move |_| on_page.run(current_page.get() + 1)
                >
                    <ChevronRight attr:class="h-4 w-4" />
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_text() {
        assert_eq!(range_text(1, 10, 0), "Showing 0 to 0 of 0 records");
        assert_eq!(range_text(1, 10, 42), "Showing 1 to 10 of 42 records");
        assert_eq!(range_text(2, 10, 42), "Showing 11 to 20 of 42 records");
        assert_eq!(range_text(5, 10, 42), "Showing 41 to 42 of 42 records");
    }
}
