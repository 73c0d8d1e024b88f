//! Position-change records and completion handlers

use serde::Serialize;

use super::error::AlignError;

/// Before/after coordinates of one element from one operation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionChange<E> {
    /// Element handle, present when the aligner is configured to include it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<E>,
    pub prev_x: i64,
    pub prev_y: i64,
    pub next_x: i64,
    pub next_y: i64,
}

impl<E> PositionChange<E> {
    /// Horizontal displacement applied by the call
    pub fn dx(&self) -> i64 {
        self.next_x - self.prev_x
    }

    /// Vertical displacement applied by the call
    pub fn dy(&self) -> i64 {
        self.next_y - self.prev_y
    }

    /// Replace the node handle, e.g. with a display name
    pub fn map_node<F, T>(self, f: F) -> PositionChange<T>
    where
        F: FnOnce(E) -> T,
    {
        PositionChange {
            node: self.node.map(f),
            prev_x: self.prev_x,
            prev_y: self.prev_y,
            next_x: self.next_x,
            next_y: self.next_y,
        }
    }
}

/// Completion handler slot for one operation call
pub enum Completion<'h, E> {
    /// No handler supplied
    Absent,
    /// Called synchronously with the records before they are returned
    Handler(&'h mut dyn FnMut(&[PositionChange<E>])),
    /// A value was supplied where a handler was expected but it is not callable
    Invalid(String),
}

impl<E> Completion<'_, E> {
    /// Reject non-callable values. Runs before any element is moved.
    pub fn validate(&self) -> Result<(), AlignError> {
        match self {
            Completion::Invalid(found) => Err(AlignError::callback_type(found.clone())),
            Completion::Absent | Completion::Handler(_) => Ok(()),
        }
    }
}

impl<E> Default for Completion<'_, E> {
    fn default() -> Self {
        Completion::Absent
    }
}

impl<E> std::fmt::Debug for Completion<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Completion::Absent => write!(f, "Absent"),
            Completion::Handler(_) => write!(f, "Handler(..)"),
            Completion::Invalid(found) => write!(f, "Invalid({:?})", found),
        }
    }
}

impl<'h, E, F> From<&'h mut F> for Completion<'h, E>
where
    F: FnMut(&[PositionChange<E>]),
{
    fn from(handler: &'h mut F) -> Self {
        Completion::Handler(handler)
    }
}

/// Deliver the change log to the handler, if any, and hand it back
pub fn report<E>(
    records: Vec<PositionChange<E>>,
    completion: Completion<'_, E>,
) -> Result<Vec<PositionChange<E>>, AlignError> {
    match completion {
        Completion::Absent => {}
        Completion::Handler(handler) => handler(&records),
        Completion::Invalid(found) => return Err(AlignError::callback_type(found)),
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(node: &'static str, dx: i64) -> PositionChange<&'static str> {
        PositionChange {
            node: Some(node),
            prev_x: 0,
            prev_y: 0,
            next_x: dx,
            next_y: 0,
        }
    }

    #[test]
    fn test_report_invokes_handler_before_returning() {
        let mut seen = Vec::new();
        let mut handler = |records: &[PositionChange<&'static str>]| {
            seen.extend(records.iter().map(|r| r.node.unwrap()));
        };
        let records = report(vec![record("a", 1), record("b", 2)], (&mut handler).into())
            .expect("handler is callable");
        assert_eq!(records.len(), 2);
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[test]
    fn test_report_without_handler() {
        let records = report(vec![record("a", 3)], Completion::Absent).unwrap();
        assert_eq!(records[0].dx(), 3);
    }

    #[test]
    fn test_invalid_completion_rejected() {
        let completion: Completion<'_, &str> = Completion::Invalid("string \"done\"".into());
        assert!(matches!(
            completion.validate(),
            Err(AlignError::CallbackType { .. })
        ));
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_string(&record("a", 4)).unwrap();
        assert_eq!(
            json,
            r#"{"node":"a","prevX":0,"prevY":0,"nextX":4,"nextY":0}"#
        );

        let anonymous = PositionChange::<String> {
            node: None,
            prev_x: 1,
            prev_y: 2,
            next_x: 3,
            next_y: 4,
        };
        let json = serde_json::to_string(&anonymous).unwrap();
        assert_eq!(json, r#"{"prevX":1,"prevY":2,"nextX":3,"nextY":4}"#);
    }
}
