// Shorthand for return Err(AdxError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(AdxError::new(ErrorKind::Variant))
// - err!(Variant(Value))   -> return Err(AdxError::new(ErrorKind::Variant(Value)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::AdxError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($value:expr)) => {
		return Err(crate::error::AdxError::new(
			crate::error::ErrorKind::$variant($value),
		))
	};
}

pub(crate) use err;
