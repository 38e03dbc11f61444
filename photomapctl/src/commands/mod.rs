pub(crate) mod markers;
