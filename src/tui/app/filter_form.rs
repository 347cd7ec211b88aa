//! Filter form popup state. Edits are applied to the filters only on confirm.

use crate::core::filters::{FilterError, FilterField, PropertyFilters, SORT_OPTIONS};

pub(crate) struct FilterForm {
    /// Text per field, indexed like `FilterField::ALL`.
    pub(crate) values: Vec<String>,
    pub(crate) focused: usize,
    pub(crate) error: Option<String>,
}

impl FilterForm {
    pub(crate) fn new(filters: &PropertyFilters) -> Self {
        Self {
            values: FilterField::ALL
                .iter()
                .map(|f| filters.value_of(*f).unwrap_or_default())
                .collect(),
            focused: 0,
            error: None,
        }
    }

    pub(crate) fn focused_field(&self) -> FilterField {
        FilterField::ALL[self.focused]
    }

    pub(crate) fn value(&self, field: FilterField) -> &str {
        FilterField::ALL
            .iter()
            .position(|f| *f == field)
            .map_or("", |i| self.values[i].as_str())
    }

    pub(crate) fn next_field(&mut self) {
        self.focused = (self.focused + 1) % FilterField::ALL.len();
    }

    pub(crate) fn prev_field(&mut self) {
        self.focused = (self.focused + FilterField::ALL.len() - 1) % FilterField::ALL.len();
    }

    /// Typing goes to text and number fields; sort is chosen with `cycle_sort`.
    pub(crate) fn push_char(&mut self, c: char) {
        if self.focused_field() != FilterField::Sort {
            self.values[self.focused].push(c);
            self.error = None;
        }
    }

    pub(crate) fn backspace(&mut self) {
        if self.focused_field() == FilterField::Sort {
            self.values[self.focused].clear();
        } else {
            self.values[self.focused].pop();
        }
        self.error = None;
    }

    pub(crate) fn clear_field(&mut self) {
        self.values[self.focused].clear();
        self.error = None;
    }

    pub(crate) fn clear_all(&mut self) {
        self.values.iter_mut().for_each(String::clear);
        self.error = None;
    }

    /// Step through the sort options (including "Default") when the sort field is focused.
    pub(crate) fn cycle_sort(&mut self, delta: isize) {
        if self.focused_field() != FilterField::Sort {
            return;
        }
        let current = self.values[self.focused].as_str();
        let idx = SORT_OPTIONS
            .iter()
            .position(|(_, wire)| wire.unwrap_or("") == current)
            .unwrap_or(0);
        let n = SORT_OPTIONS.len() as isize;
        let next = (idx as isize + delta).rem_euclid(n) as usize;
        self.values[self.focused] = SORT_OPTIONS[next].1.unwrap_or("").to_string();
    }

    /// Filters with every form value applied, on page 0. `base` is left untouched on error.
    pub(crate) fn apply(&self, base: &PropertyFilters) -> Result<PropertyFilters, FilterError> {
        let mut out = base.clone();
        for (field, value) in FilterField::ALL.iter().zip(&self.values) {
            out.set(*field, value)?;
        }
        out.page = 0;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut FilterForm, s: &str) {
        for c in s.chars() {
            form.push_char(c);
        }
    }

    #[test]
    fn starts_from_current_filters() {
        let mut filters = PropertyFilters::default();
        filters.set(FilterField::City, "Irvine").unwrap();
        let form = FilterForm::new(&filters);
        assert_eq!(form.value(FilterField::City), "Irvine");
        assert_eq!(form.value(FilterField::Zip), "");
    }

    #[test]
    fn apply_sets_fields_and_resets_page() {
        let mut base = PropertyFilters::default();
        base.page = 3;
        let mut form = FilterForm::new(&base);
        type_str(&mut form, "Tustin");
        form.focused = 5; // Beds
        type_str(&mut form, "3");
        let out = form.apply(&base).unwrap();
        assert_eq!(out.city.as_deref(), Some("Tustin"));
        assert_eq!(out.beds, Some(3));
        assert_eq!(out.page, 0);
        assert_eq!(out.size, base.size);
    }

    #[test]
    fn apply_reports_bad_number() {
        let base = PropertyFilters::default();
        let mut form = FilterForm::new(&base);
        form.focused = 3; // Min price
        type_str(&mut form, "lots");
        assert!(matches!(
            form.apply(&base),
            Err(FilterError::Number { .. })
        ));
    }

    #[test]
    fn sort_cycles_through_options_and_ignores_typing() {
        let mut form = FilterForm::new(&PropertyFilters::default());
        form.prev_field();
        assert_eq!(form.focused_field(), FilterField::Sort);
        form.push_char('x');
        assert_eq!(form.value(FilterField::Sort), "");
        form.cycle_sort(1);
        assert_eq!(form.value(FilterField::Sort), "price,asc");
        form.cycle_sort(-1);
        assert_eq!(form.value(FilterField::Sort), "");
        form.cycle_sort(-1);
        assert_eq!(
            form.value(FilterField::Sort),
            SORT_OPTIONS.last().unwrap().1.unwrap()
        );
        let out = form.apply(&PropertyFilters::default()).unwrap();
        assert!(out.sort.is_some());
    }

    #[test]
    fn clearing_returns_to_empty_filters() {
        let mut filters = PropertyFilters::default();
        filters.set(FilterField::City, "Irvine").unwrap();
        filters.set(FilterField::MinBeds, "2").unwrap();
        let mut form = FilterForm::new(&filters);
        form.clear_all();
        let out = form.apply(&filters).unwrap();
        assert!(out.is_empty());
    }
}
