//! Typed facades over the gateway, one module per backend resource.
//!
//! Filter structs build their query pairs through [`QueryPairs`]; a field that
//! is absent is omitted from the query string entirely, because the backend
//! treats a missing filter as "no restriction".

pub mod attendance;
pub mod auth;
pub mod pyq;
pub mod results;
pub mod timetable;

/// Accumulates `(key, value)` pairs, skipping absent values.
#[derive(Debug, Default)]
pub(crate) struct QueryPairs(Vec<(&'static str, String)>);

impl QueryPairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_opt(&mut self, key: &'static str, value: Option<impl ToString>) {
        if let Some(value) = value {
            self.0.push((key, value.to_string()));
        }
    }

    pub fn push(&mut self, key: &'static str, value: impl ToString) {
        self.0.push((key, value.to_string()));
    }

    pub fn into_vec(self) -> Vec<(&'static str, String)> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_values_are_omitted() {
        let mut q = QueryPairs::new();
        q.push_opt("subject", None::<String>);
        q.push_opt("semester", Some(3));
        assert_eq!(q.into_vec(), vec![("semester", "3".to_string())]);
    }

    #[test]
    fn all_absent_yields_empty() {
        let mut q = QueryPairs::new();
        q.push_opt("a", None::<String>);
        q.push_opt("b", None::<i32>);
        assert!(q.into_vec().is_empty());
    }
}
