//! DOM Rendering
//!
//! Effects that project the store onto the server-rendered elements.

use std::rc::Rc;

use leptos::prelude::*;
use web_sys::Element;

use crate::markup::{PageMarkup, RowMarkup, PACKED_LABEL_CLASSES};
use crate::models::ItemRow;
use crate::progress::{self, ProgressReport, ProgressState};
use crate::store::{store_categories, store_rows, PackingStore};

/// Install render effects; they run once immediately and after every store change
pub fn bind(store: PackingStore, markup: Rc<PageMarkup>) {
    let row_markup = Rc::clone(&markup);
    Effect::new(move |_| {
        for row in store_rows(&store) {
            if let Some(el) = row_markup.rows.get(&row.key) {
                render_row(el, &row);
            }
        }
    });

    // Progress is recomputed from scratch on every change
    Effect::new(move |_| {
        let report = progress::summarize(&store_rows(&store), &store_categories(&store));
        render_progress(&markup, &report);
    });
}

fn render_row(el: &RowMarkup, row: &ItemRow) {
    el.checkbox.set_checked(row.packed);

    if let Some(label) = &el.label {
        for class in PACKED_LABEL_CLASSES {
            let _ = label.class_list().toggle_with_force(class, row.confirmed_packed);
        }
    }

    if let (Some(display), Some(quantity)) = (&el.quantity_display, row.quantity) {
        display.set_text_content(Some(&quantity.to_string()));
    }

    if let Some(btn) = &el.decrease_btn {
        btn.set_disabled(!row.can_decrease);
    }
}

fn render_progress(markup: &PageMarkup, report: &ProgressReport) {
    for (category, el) in report.categories.iter().zip(&markup.categories) {
        if let Some(badge) = &el.badge {
            badge.set_text_content(Some(&category.tally.label()));
            apply_state(badge, category.tally.state());
        }
    }

    if let Some(summary) = &markup.summary {
        let overall = report.overall;
        let percentage = overall.percentage();

        summary.badge.set_text_content(Some(&overall.summary_label()));
        apply_state(&summary.badge, overall.state());
        apply_state(&summary.bar, overall.state());
        let _ = summary.bar.style().set_property("width", &format!("{}%", percentage));
        let _ = summary.bar.set_attribute("aria-valuenow", &percentage.to_string());
    }
}

fn apply_state(el: &Element, state: ProgressState) {
    let classes = el.class_list();
    let _ = classes.remove_1(state.opposite_class());
    let _ = classes.add_1(state.class());
}
