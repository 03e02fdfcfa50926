//! Contract skeletons for `glimpse init`.
//!
//! The skeleton is embedded into the binary at compile-time via [`include_str!`] in the
//! [`embedded`] module, then stamped with a contract name and layout at runtime with
//! [Handlebars](https://handlebarsjs.com/) via the [`renderer::TemplateRenderer`].
//!
//! The result is an ordinary marker template: the START/END comment pairs pass
//! through Handlebars untouched and are filled later by [`crate::splicer`].
//!
//! **Warning**: Template files in `templates/` and constants in [`embedded`] must stay in sync.
//! The `include_str!` paths are relative to the embedding file and checked at compile-time.

pub mod embedded;
pub mod renderer;
