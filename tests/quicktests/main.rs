//! Property tests over the public API of the index.

mod index;
