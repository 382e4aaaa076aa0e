//! Positional constructor arguments.

use std::any::{Any, type_name};
use std::fmt;

use crate::error::ConstructionError;

/// An ordered bag of type-erased constructor arguments.
///
/// Arguments are forwarded to a factory exactly as given; the factory pulls
/// them out by position and type.
#[derive(Default)]
pub struct Args {
    values: Vec<Option<Box<dyn Any + Send>>>,
}

impl Args {
    pub fn new() -> Self { Self::default() }

    pub fn with<V: Any + Send>(mut self, value: V) -> Self {
        self.push(value);
        self
    }

    pub fn push<V: Any + Send>(&mut self, value: V) { self.values.push(Some(Box::new(value))); }

    pub fn len(&self) -> usize { self.values.len() }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    /// Borrow the argument at `index` as a `V`.
    pub fn get<V: Any>(&self, index: usize) -> Result<&V, ConstructionError> {
        let value = self
            .values
            .get(index)
            .and_then(Option::as_ref)
            .ok_or(ConstructionError::MissingArgument { index })?;

        value
            .downcast_ref::<V>()
            .ok_or(ConstructionError::ArgumentType {
                index,
                expected: type_name::<V>(),
            })
    }

    /// Move the argument at `index` out of the bag. A taken slot reads as
    /// missing afterwards; positions of the other arguments do not shift.
    pub fn take<V: Any>(&mut self, index: usize) -> Result<V, ConstructionError> {
        let slot = self
            .values
            .get_mut(index)
            .ok_or(ConstructionError::MissingArgument { index })?;

        match slot.take() {
            Some(value) => match value.downcast::<V>() {
                Ok(v) => Ok(*v),
                Err(value) => {
                    *slot = Some(value);
                    Err(ConstructionError::ArgumentType {
                        index,
                        expected: type_name::<V>(),
                    })
                }
            },
            None => Err(ConstructionError::MissingArgument { index }),
        }
    }

    /// Like [`Args::get`], but an absent argument yields `None`.
    pub fn get_opt<V: Any>(&self, index: usize) -> Result<Option<&V>, ConstructionError> {
        match self.get(index) {
            Ok(v) => Ok(Some(v)),
            Err(ConstructionError::MissingArgument { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args").field("len", &self.values.len()).finish()
    }
}

/// Build an [`Args`] from a list of values.
///
/// ```
/// use overrider::args;
///
/// let args = args!["smtp.example.com", 587u16];
/// assert_eq!(args.len(), 2);
/// assert_eq!(*args.get::<u16>(1).unwrap(), 587);
/// ```
#[macro_export]
macro_rules! args {
    () => { $crate::Args::new() };
    ($($value:expr),+ $(,)?) => {
        $crate::Args::new()$(.with($value))+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_position() {
        let args = Args::new().with("a").with(2u32).with(String::from("c"));

        assert_eq!(args.len(), 3);
        assert_eq!(*args.get::<&str>(0).unwrap(), "a");
        assert_eq!(*args.get::<u32>(1).unwrap(), 2);
        assert_eq!(args.get::<String>(2).unwrap(), "c");
    }

    #[test]
    fn test_wrong_type_is_reported() {
        let args = Args::new().with(1u8);
        let err = args.get::<String>(0).unwrap_err();
        assert!(matches!(err, ConstructionError::ArgumentType { index: 0, .. }));
    }

    #[test]
    fn test_missing_index_is_reported() {
        let args = Args::new();
        assert!(args.is_empty());
        assert!(matches!(
            args.get::<u8>(0),
            Err(ConstructionError::MissingArgument { index: 0 })
        ));
        assert!(args.get_opt::<u8>(0).unwrap().is_none());
    }

    #[test]
    fn test_take_leaves_hole() {
        let mut args = Args::new().with(String::from("moved")).with(7i64);

        assert_eq!(args.take::<String>(0).unwrap(), "moved");
        assert!(matches!(
            args.take::<String>(0),
            Err(ConstructionError::MissingArgument { index: 0 })
        ));
        assert_eq!(args.take::<i64>(1).unwrap(), 7);
    }

    #[test]
    fn test_failed_take_keeps_value() {
        let mut args = Args::new().with(7i64);

        assert!(args.take::<String>(0).is_err());
        assert_eq!(args.take::<i64>(0).unwrap(), 7);
    }

    #[test]
    fn test_macro() {
        let args = crate::args![1u8, "two"];
        assert_eq!(args.len(), 2);
        assert!(crate::args![].is_empty());
    }
}
