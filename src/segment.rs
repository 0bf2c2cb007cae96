use std::any::Any;
use std::fmt::Display;

/// A key segment as seen by traversal hooks.
///
/// One traversal crosses several levels, each with its own key type, so hooks receive
/// the incoming edge key type-erased. Any `'static` type with `Display` is a segment;
/// the concrete key can be recovered with [`downcast_ref`](#method.downcast_ref).
pub trait Segment: Any + Display {
    fn as_any(&self) -> &dyn Any;
    /// Name of the concrete key type, e.g. `alloc::string::String`.
    fn type_name(&self) -> &'static str;
}

impl<T: Any + Display> Segment for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl<'a> dyn Segment + 'a {
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

#[cfg(test)]
mod tests {
    use crate::segment::Segment;

    #[test]
    fn test_downcast() {
        let key = String::from("Sales");
        let seg: &dyn Segment = &key;
        assert!(seg.is::<String>());
        assert!(!seg.is::<&str>());
        assert_eq!(seg.downcast_ref::<String>().map(String::as_str), Some("Sales"));
        assert_eq!(seg.downcast_ref::<char>(), None);
        assert_eq!(seg.to_string(), "Sales");
        assert_eq!(seg.type_name(), std::any::type_name::<String>());
    }
}
