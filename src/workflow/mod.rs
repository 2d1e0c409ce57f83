//! Git workflow orchestration
//!
//! Sequences git sub-commands into story-level workflows (start, commit,
//! push, sync, resolve, undo, tag). Nothing is cached between operations:
//! every call re-reads the repository state it needs.
//!
//! Operations assume exclusive access to the working tree. Running two
//! orchestrators against the same repository at once is unsupported; git's
//! own `index.lock` is the only guard.

pub mod error;
pub mod manager;
pub mod naming;
pub mod sync;

pub use error::WorkflowError;
pub use manager::{WorkflowManager, WorkflowSettings};
pub use naming::{BranchType, NamingConvention};
pub use sync::{Divergence, ResolveStrategy, SyncOutcome};
