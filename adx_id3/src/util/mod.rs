pub(crate) mod bytes;
pub(crate) mod io;
