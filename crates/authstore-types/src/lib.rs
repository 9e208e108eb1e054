//! Record types shared by the authstore crates.
//!
//! Each of the four stored relations has three shapes here:
//!
//! | Relation | Stored row | Insert record | Partial update |
//! |----------|-----------|---------------|----------------|
//! | `User` | [`User`] | [`NewUser`] | [`UserPatch`] |
//! | `Account` | [`Account`] | [`NewAccount`] | none |
//! | `Session` | [`Session`] | [`NewSession`] | [`SessionPatch`] |
//! | `VerificationToken` | [`VerificationToken`] | [`NewVerificationToken`] | none |
//!
//! Serde field names follow the identity framework that consumes the adapter
//! (`emailVerified`, `userId`, `providerAccountId`, `sessionToken`), so rows
//! can be handed to it as JSON without a mapping layer.

mod account;
mod patch;
mod session;
mod user;
mod verification;

pub use account::{Account, NewAccount};
pub use session::{NewSession, Session, SessionAndUser, SessionPatch};
pub use user::{NewUser, User, UserPatch};
pub use verification::{NewVerificationToken, VerificationToken};
