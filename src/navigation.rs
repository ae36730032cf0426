//! Module navigation: which module is current and where next/previous lead

/// Ordered module ids with position-based lookups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleNavigator {
    modules: Vec<String>,
}

impl ModuleNavigator {
    /// Create a navigator over `modules` in page order
    pub fn new<I, M>(modules: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        Self { modules: modules.into_iter().map(Into::into).collect() }
    }

    /// Module ids in page order
    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    /// Position of `module`, if known
    pub fn index_of(&self, module: &str) -> Option<usize> {
        self.modules.iter().position(|m| m == module)
    }

    /// Index of the module the reader is in
    ///
    /// `tops` holds each module's top offset in page order; the current module
    /// is the last one starting at or above `probe` (usually the scroll
    /// position plus a third of the viewport height).
    pub fn current_index(&self, tops: &[f64], probe: f64) -> Option<usize> {
        tops.iter().take(self.modules.len()).rposition(|&top| top <= probe)
    }

    /// Module after `current`, clamped to the last; the first if there is no current
    pub fn next(&self, current: Option<usize>) -> Option<&str> {
        let last = self.modules.len().checked_sub(1)?;
        let target = current.map_or(0, |i| (i + 1).min(last));
        self.modules.get(target).map(String::as_str)
    }

    /// Module before `current`, clamped to the first
    pub fn prev(&self, current: Option<usize>) -> Option<&str> {
        let target = current.map_or(0, |i| i.saturating_sub(1));
        self.modules.get(target).map(String::as_str)
    }

    /// Module at 1-based position `number`
    pub fn jump(&self, number: usize) -> Option<&str> {
        number.checked_sub(1).and_then(|i| self.modules.get(i)).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav() -> ModuleNavigator {
        ModuleNavigator::new(["intro", "capabilities", "calculator", "faq"])
    }

    #[test]
    fn current_is_last_module_above_probe() {
        let nav = nav();
        let tops = [0.0, 800.0, 1600.0, 2400.0];

        assert_eq!(nav.current_index(&tops, 10.0), Some(0));
        assert_eq!(nav.current_index(&tops, 800.0), Some(1));
        assert_eq!(nav.current_index(&tops, 2000.0), Some(2));
        assert_eq!(nav.current_index(&tops, 9000.0), Some(3));
    }

    #[test]
    fn no_current_above_first_module() {
        let nav = nav();
        assert_eq!(nav.current_index(&[500.0, 900.0, 1300.0, 1700.0], 100.0), None);
    }

    #[test]
    fn next_and_prev_clamp() {
        let nav = nav();
        assert_eq!(nav.next(Some(1)), Some("calculator"));
        assert_eq!(nav.next(Some(3)), Some("faq"));
        assert_eq!(nav.prev(Some(1)), Some("intro"));
        assert_eq!(nav.prev(Some(0)), Some("intro"));
    }

    #[test]
    fn no_current_module_starts_at_first() {
        let nav = nav();
        assert_eq!(nav.next(None), Some("intro"));
        assert_eq!(nav.prev(None), Some("intro"));
    }

    #[test]
    fn jump_is_one_based() {
        let nav = nav();
        assert_eq!(nav.jump(1), Some("intro"));
        assert_eq!(nav.jump(4), Some("faq"));
        assert_eq!(nav.jump(0), None);
        assert_eq!(nav.jump(5), None);
    }

    #[test]
    fn empty_navigator_goes_nowhere() {
        let nav = ModuleNavigator::default();
        assert_eq!(nav.next(None), None);
        assert_eq!(nav.prev(Some(2)), None);
    }
}
