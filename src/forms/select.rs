//! Searchable select control.
//!
//! A select list with a typable filter line. Filtering is a pure,
//! case-insensitive substring match over option labels, re-applied per
//! keystroke; the placeholder row is always visible so the operator can
//! clear the choice.

use crate::utils::contains_ignore_case;

/// One selectable row. `value: None` is the placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: Option<i64>,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct SearchSelect {
    options: Vec<SelectOption>,
    pub query: String,
    /// Cursor index into `visible_options()`
    cursor: usize,
    /// Committed choice; survives query edits as long as the option exists
    selected: Option<i64>,
}

impl SearchSelect {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            options: vec![SelectOption {
                value: None,
                label: placeholder.into(),
            }],
            query: String::new(),
            cursor: 0,
            selected: None,
        }
    }

    /// Replace the option list, keeping the placeholder and the current
    /// filter text. Repopulation can land mid-keystroke when a background
    /// fetch widens the list, so the query survives and the cursor is
    /// clamped to the new visible set.
    pub fn set_options(&mut self, options: impl IntoIterator<Item = (i64, String)>) {
        self.options.truncate(1);
        self.options.extend(
            options
                .into_iter()
                .map(|(value, label)| SelectOption {
                    value: Some(value),
                    label,
                }),
        );
        self.clamp_cursor();
        if let Some(id) = self.selected {
            if !self.options.iter().any(|o| o.value == Some(id)) {
                self.selected = None;
            }
        }
    }

    /// Options matching the current query; the placeholder always shows
    pub fn visible_options(&self) -> Vec<&SelectOption> {
        self.options
            .iter()
            .filter(|o| o.value.is_none() || contains_ignore_case(&o.label, &self.query))
            .collect()
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.clamp_cursor();
    }

    pub fn backspace(&mut self) {
        self.query.pop();
        self.clamp_cursor();
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let max = self.visible_options().len().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(max);
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Commit the option under the cursor
    pub fn choose_under_cursor(&mut self) {
        if let Some(option) = self.visible_options().get(self.cursor) {
            self.selected = option.value;
        }
    }

    pub fn selected_value(&self) -> Option<i64> {
        self.selected
    }

    pub fn selected_label(&self) -> Option<&str> {
        let id = self.selected?;
        self.options
            .iter()
            .find(|o| o.value == Some(id))
            .map(|o| o.label.as_str())
    }

    fn clamp_cursor(&mut self) {
        let max = self.visible_options().len().saturating_sub(1);
        self.cursor = self.cursor.min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select_with(names: &[(i64, &str)]) -> SearchSelect {
        let mut s = SearchSelect::new("Select VA...");
        s.set_options(names.iter().map(|(id, n)| (*id, n.to_string())));
        s
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let mut s = select_with(&[(1, "Maria Santos"), (2, "Jose Cruz"), (3, "Ana Marie Reyes")]);
        for c in "MARI".chars() {
            s.push_char(c);
        }
        let labels: Vec<&str> = s
            .visible_options()
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Select VA...", "Maria Santos", "Ana Marie Reyes"]);
    }

    #[test]
    fn test_placeholder_always_visible() {
        let mut s = select_with(&[(1, "Maria Santos")]);
        for c in "zzz".chars() {
            s.push_char(c);
        }
        let visible = s.visible_options();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].value, None);
    }

    #[test]
    fn test_empty_query_shows_everything() {
        let s = select_with(&[(1, "Maria Santos"), (2, "Jose Cruz")]);
        assert_eq!(s.visible_options().len(), 3);
    }

    #[test]
    fn test_cursor_clamped_to_visible() {
        let mut s = select_with(&[(1, "Maria Santos"), (2, "Jose Cruz")]);
        s.cursor_down();
        s.cursor_down();
        assert_eq!(s.cursor(), 2);
        for c in "jose".chars() {
            s.push_char(c);
        }
        // Only placeholder + Jose remain visible
        assert!(s.cursor() <= 1);
    }

    #[test]
    fn test_choose_and_clear() {
        let mut s = select_with(&[(1, "Maria Santos"), (2, "Jose Cruz")]);
        s.cursor_down();
        s.cursor_down();
        s.choose_under_cursor();
        assert_eq!(s.selected_value(), Some(2));
        assert_eq!(s.selected_label(), Some("Jose Cruz"));

        s.cursor_up();
        s.cursor_up();
        s.choose_under_cursor(); // placeholder clears the choice
        assert_eq!(s.selected_value(), None);
    }

    #[test]
    fn test_repopulation_keeps_filter_text() {
        let mut s = select_with(&[(1, "Maria Santos")]);
        for c in "mar".chars() {
            s.push_char(c);
        }

        // A wider list lands while the operator is mid-filter
        s.set_options([
            (1, "Maria Santos".to_string()),
            (2, "Jose Cruz".to_string()),
            (3, "Ana Marie Reyes".to_string()),
        ]);

        assert_eq!(s.query, "mar");
        let labels: Vec<&str> = s
            .visible_options()
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Select VA...", "Maria Santos", "Ana Marie Reyes"]);
    }

    #[test]
    fn test_repopulation_clamps_cursor() {
        let mut s = select_with(&[(1, "Maria Santos"), (2, "Jose Cruz"), (3, "Ana Reyes")]);
        s.cursor_down();
        s.cursor_down();
        s.cursor_down();
        assert_eq!(s.cursor(), 3);

        s.set_options([(1, "Maria Santos".to_string())]);
        assert!(s.cursor() <= 1);
    }

    #[test]
    fn test_set_options_drops_stale_selection() {
        let mut s = select_with(&[(1, "Maria Santos")]);
        s.cursor_down();
        s.choose_under_cursor();
        assert_eq!(s.selected_value(), Some(1));

        s.set_options([(2, "Jose Cruz".to_string())]);
        assert_eq!(s.selected_value(), None);
    }
}
