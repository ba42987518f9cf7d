//! Header and list view models plus their plain-text rendering.
//!
//! # Invariants
//! - Views read the store only through its public queries.
//! - List rows keep `today_foods()` order and carry the record id as key.

use crate::clock::Clock;
use crate::model::food::FoodRecord;
use crate::storage::KeyValueStorage;
use crate::store::food_store::FoodStore;
use crate::view::number::NumberFormat;

pub const APP_TITLE: &str = "CALOR-IA";
pub const EMPTY_TITLE: &str = "No hay registros hoy";
pub const EMPTY_HINT: &str = "Agrega tu primer alimento del dia";

/// Title plus today's calorie total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub title: &'static str,
    pub total_calories: u64,
    pub formatted_total: String,
}

impl HeaderView {
    pub fn from_store<S: KeyValueStorage, C: Clock>(
        store: &FoodStore<S, C>,
        format: &NumberFormat,
    ) -> Self {
        let total_calories = store.total_calories();
        Self {
            title: APP_TITLE,
            total_calories,
            formatted_total: format.format_integer(total_calories),
        }
    }
}

/// One read-only list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodRowView {
    /// Stable row key, the record id.
    pub key: String,
    pub name: String,
    pub quantity: String,
    pub calories: u32,
    pub time: String,
}

impl From<&FoodRecord> for FoodRowView {
    fn from(record: &FoodRecord) -> Self {
        Self {
            key: record.id.to_string(),
            name: record.name.clone(),
            quantity: record.quantity.clone(),
            calories: record.calories,
            time: record.time.clone(),
        }
    }
}

/// Today's list, or the empty state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoodListView {
    Empty,
    Rows(Vec<FoodRowView>),
}

impl FoodListView {
    pub fn from_store<S: KeyValueStorage, C: Clock>(store: &FoodStore<S, C>) -> Self {
        Self::from_records(store.today_foods())
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a FoodRecord>) -> Self {
        let rows: Vec<FoodRowView> = records.into_iter().map(FoodRowView::from).collect();
        if rows.is_empty() {
            Self::Empty
        } else {
            Self::Rows(rows)
        }
    }
}

/// Renders `CALOR-IA` and `Total: <n> kcal` on two lines.
pub fn render_header(header: &HeaderView) -> String {
    format!(
        "{}\nTotal: {} kcal\n",
        header.title, header.formatted_total
    )
}

/// Renders each row as `name  time` over `quantity · N kcal`, or the
/// empty-state message.
pub fn render_list(list: &FoodListView) -> String {
    match list {
        FoodListView::Empty => format!("{EMPTY_TITLE}\n{EMPTY_HINT}\n"),
        FoodListView::Rows(rows) => {
            let mut out = String::new();
            for row in rows {
                out.push_str(&format!("{}  {}\n", row.name, row.time));
                out.push_str(&format!("  {} \u{b7} {} kcal\n", row.quantity, row.calories));
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{render_header, render_list, FoodListView, HeaderView, APP_TITLE};
    use crate::model::food::{FoodFormData, FoodId, FoodRecord};
    use chrono::Utc;

    #[test]
    fn render_header_shows_formatted_total() {
        let header = HeaderView {
            title: APP_TITLE,
            total_calories: 2150,
            formatted_total: "2,150".to_string(),
        };
        assert_eq!(render_header(&header), "CALOR-IA\nTotal: 2,150 kcal\n");
    }

    #[test]
    fn empty_records_render_empty_state() {
        let list = FoodListView::from_records(Vec::<&FoodRecord>::new());
        assert_eq!(list, FoodListView::Empty);
        assert!(render_list(&list).starts_with("No hay registros hoy\n"));
    }

    #[test]
    fn rows_are_keyed_by_record_id() {
        let record = FoodRecord::from_form(
            FoodId::new("k-1"),
            &FoodFormData::new("Pollo", "200g", 250, "08:30"),
            Utc::now(),
        );
        let list = FoodListView::from_records([&record]);
        let FoodListView::Rows(rows) = &list else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].key, "k-1");
        assert_eq!(
            render_list(&list),
            "Pollo  08:30\n  200g \u{b7} 250 kcal\n"
        );
    }
}
