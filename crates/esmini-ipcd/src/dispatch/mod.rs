//! Command decoding and dispatch.
//!
//! Each frame body is decoded into a [`CommandRequest`], whose `function`
//! name maps onto the closed [`Verb`] set. The [`CommandDispatcher`] validates
//! the verb's arguments and makes one backend call through the
//! [`SharedBackend`].
//!
//! | Command                 | Required args                                            |
//! |-------------------------|----------------------------------------------------------|
//! | `SE_Init`               | `xosc_path`, `disable_ctrls`, `use_viewer`, `threads`, `record` |
//! | `SE_ReportObjectPosXYH` | `object_id`, `timestamp`, `x`, `y`, `h`                  |
//! | `SE_Step`               | none                                                     |
//! | `SE_Close`              | none (ends the session)                                  |
//!
//! The channel is one-way: failures are logged, never sent to the peer.

mod arguments;
mod errors;
mod request;
mod router;
mod shared_backend;

pub use self::errors::DispatchError;
pub use self::request::{CommandRequest, Verb};
pub use self::router::CommandDispatcher;
pub use self::shared_backend::SharedBackend;
