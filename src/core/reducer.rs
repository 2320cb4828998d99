//! Named reducers for dispatching state changes.
//!
//! Plain functions and closures of shape `FnOnce(&S) -> S` can be passed to
//! [`HistoryStore::dispatch`](crate::store::HistoryStore::dispatch) directly.
//! The [`Reducer`] trait covers the other common shape: an action value that
//! knows how to compute the next state, such as an enum of commands.

use super::state::State;

/// Pure function from the current state to the next one.
///
/// Implementations must not rely on interior mutability of the input and
/// must always return a fresh value. The store does not verify purity.
///
/// # Example
///
/// ```rust
/// use hindsight::core::{Reducer, State};
///
/// #[derive(Debug, PartialEq)]
/// struct Counter {
///     count: i64,
/// }
///
/// impl State for Counter {}
///
/// enum CounterAction {
///     Add,
///     Reset,
/// }
///
/// impl Reducer<Counter> for CounterAction {
///     fn reduce(&self, state: &Counter) -> Counter {
///         match self {
///             Self::Add => Counter { count: state.count + 1 },
///             Self::Reset => Counter { count: 0 },
///         }
///     }
/// }
///
/// let next = CounterAction::Add.reduce(&Counter { count: 1 });
/// assert_eq!(next, Counter { count: 2 });
/// assert_eq!(CounterAction::Reset.reduce(&next), Counter { count: 0 });
/// ```
pub trait Reducer<S: State> {
    /// Compute the next state from `state`.
    fn reduce(&self, state: &S) -> S;

    /// Label used in log output.
    ///
    /// Default implementation returns the reducer's type name.
    fn label(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<S: State, R: Reducer<S> + ?Sized> Reducer<S> for Box<R> {
    fn reduce(&self, state: &S) -> S {
        (**self).reduce(state)
    }

    fn label(&self) -> &str {
        (**self).label()
    }
}

impl<S: State, R: Reducer<S> + ?Sized> Reducer<S> for &R {
    fn reduce(&self, state: &S) -> S {
        (**self).reduce(state)
    }

    fn label(&self) -> &str {
        (**self).label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    struct Notepad {
        words: String,
    }

    impl State for Notepad {}

    struct Update(String);

    impl Reducer<Notepad> for Update {
        fn reduce(&self, _state: &Notepad) -> Notepad {
            Notepad {
                words: self.0.clone(),
            }
        }

        fn label(&self) -> &str {
            "update"
        }
    }

    #[test]
    fn reducer_produces_new_state() {
        let before = Notepad {
            words: "begin".to_string(),
        };
        let after = Update("hello".to_string()).reduce(&before);

        assert_eq!(after.words, "hello");
        assert_eq!(before.words, "begin");
    }

    #[test]
    fn reducer_is_deterministic() {
        let state = Notepad {
            words: "x".to_string(),
        };
        let update = Update("y".to_string());
        assert_eq!(update.reduce(&state), update.reduce(&state));
    }

    #[test]
    fn boxed_reducers_delegate() {
        let reducers: Vec<Box<dyn Reducer<Notepad>>> = vec![
            Box::new(Update("one".to_string())),
            Box::new(Update("two".to_string())),
        ];

        let mut state = Notepad {
            words: String::new(),
        };
        for reducer in &reducers {
            assert_eq!(reducer.label(), "update");
            state = reducer.reduce(&state);
        }
        assert_eq!(state.words, "two");
    }
}
