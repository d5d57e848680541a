//! Actions: computing a mocked call's return value.
//!
//! Two flavors. [`return_value`] owns one fixed value and yields it
//! regardless of the call's arguments; [`invoke_action`] owns a closure and
//! forwards the argument list to it, the escape hatch for return values
//! that depend on the call or carry side effects.

use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::error::Result;
use crate::test_run::TestRun;
use crate::value::ArgValue;

/// Behavior of an action: compute the value a mocked call returns.
///
/// `invoke` has no failure mode; only construction can fail.
pub trait MockAction: fmt::Debug {
    /// Compute the return value for a call with the given arguments.
    fn invoke(&self, params: &[ArgValue]) -> ArgValue;
}

/// A shareable handle to an action.
#[derive(Clone)]
pub struct Action(Rc<dyn MockAction>);

impl Action {
    /// Wrap a user-implemented action, charging its storage to the run.
    pub fn custom<A: MockAction + 'static>(test: &TestRun, action: A) -> Result<Self> {
        test.charge(mem::size_of::<A>())?;
        Ok(Self(Rc::new(action)))
    }

    /// Compute the return value for a call.
    pub fn invoke(&self, params: &[ArgValue]) -> ArgValue {
        self.0.invoke(params)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug)]
struct ReturnAction {
    value: ArgValue,
}

impl MockAction for ReturnAction {
    fn invoke(&self, _params: &[ArgValue]) -> ArgValue {
        self.value.clone()
    }
}

/// Action that always returns the given value, ignoring the call's
/// arguments. Works for every primitive and pointer kind.
///
/// ```rust
/// use mockmatch::{return_value, ArgValue, TestRun};
///
/// let test = TestRun::new();
/// let action = return_value(&test, true).unwrap();
/// assert_eq!(action.invoke(&[]), ArgValue::Bool(true));
/// ```
pub fn return_value(test: &TestRun, value: impl Into<ArgValue>) -> Result<Action> {
    Action::custom(
        test,
        ReturnAction {
            value: value.into(),
        },
    )
}

struct InvokeAction {
    delegate: Rc<dyn Fn(&[ArgValue]) -> ArgValue>,
}

impl MockAction for InvokeAction {
    fn invoke(&self, params: &[ArgValue]) -> ArgValue {
        (self.delegate)(params)
    }
}

impl fmt::Debug for InvokeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvokeAction").finish_non_exhaustive()
    }
}

/// Action that forwards the call's argument list to a delegate closure and
/// returns its result unchanged.
pub fn invoke_action(
    test: &TestRun,
    delegate: impl Fn(&[ArgValue]) -> ArgValue + 'static,
) -> Result<Action> {
    Action::custom(
        test,
        InvokeAction {
            delegate: Rc::new(delegate),
        },
    )
}
