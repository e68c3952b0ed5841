//! Spatial placement and hit-testing engine for the brick editor.
//!
//! This crate owns everything between a raw pointer/keyboard event and a
//! committed block: converting screen positions into grid cells through either
//! the top-down 2D projection or the perspective 3D scene, deciding whether a
//! pointer over an existing brick means "stack on top" or "place beside", and
//! keeping the derived height map consistent with every edit. Front ends only
//! forward events to [`engine::EngineCore`] and redraw from what it exposes;
//! persistence is handled by the host through [`block::BuildRecord`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Editing session: input routing, preview, save/load |
//! | [`block`] | Block data model, footprints, rotations and persistence records |
//! | [`registry`] | Ordered block store with id and render-handle indexes |
//! | [`height`] | Derived per-cell stack height |
//! | [`grid`] | World/grid coordinate conversions |
//! | [`camera`] | 2D pan/zoom camera and 3D perspective/orbit cameras |
//! | [`hit`] | Hit-testing in both projections |
//! | [`place`] | Placement resolution (stack vs. beside) |
//! | [`selection`] | Single-block selection |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`scene`] | Draw lists consumed by the 2D and 3D front ends |
//! | [`config`] | Engine geometry and active editor settings |
//! | [`consts`] | Shared numeric constants and catalogue defaults |
//! | [`error`] | Error type for boundary validation and commits |

pub mod block;
pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod grid;
pub mod height;
pub mod hit;
pub mod input;
pub mod place;
pub mod registry;
pub mod scene;
pub mod selection;
