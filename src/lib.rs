// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! CAD part tree with a threaded VR scene mirror.
//!
//! vrcad keeps an STL assembly as a hierarchy of parts, draws it on screen,
//! and can mirror the visible parts into a head-mounted display running on
//! its own thread.
//!
//! # Key entry points
//!
//! - [`tree::PartTree`] - the part hierarchy and the screen scene it drives
//! - [`mirror::VrMirrorSession`] - one VR mirror worker and its commands
//! - [`studio::Studio`] - the application controller tying both together
//! - [`options::Options`] - runtime configuration (tick rates, placement,
//!   filter defaults, backgrounds)
//!
//! # Architecture
//!
//! Every part with geometry owns a proxy [`scene::Drawable`] in the screen
//! [`scene::SceneGraph`]. Starting VR copies the visible proxies into
//! [`mirror::RenderableSnapshot`]s, which move to a `vr-mirror` worker
//! thread together with a [`mirror::HeadsetProvider`]. The worker builds
//! its own scene, connects the headset and renders until told to stop;
//! rotation, background and light reach it through a coalescing command
//! channel read every tick. Meshes are shared read-only through `Arc`;
//! nothing else crosses the thread boundary.

pub mod error;
pub mod geometry;
pub mod mirror;
pub mod options;
pub mod render;
pub mod scene;
pub mod settings;
pub mod studio;
pub mod tree;
pub mod util;
