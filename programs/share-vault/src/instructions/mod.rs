pub mod approve;
pub mod deposit;
pub mod initialize;
pub mod mint;
pub mod redeem;
pub mod transfer_shares;
pub mod view;
pub mod withdraw;

#[allow(ambiguous_glob_reexports)]
pub use approve::*;
#[allow(ambiguous_glob_reexports)]
pub use deposit::*;
#[allow(ambiguous_glob_reexports)]
pub use initialize::*;
#[allow(ambiguous_glob_reexports)]
pub use mint::*;
#[allow(ambiguous_glob_reexports)]
pub use redeem::*;
#[allow(ambiguous_glob_reexports)]
pub use transfer_shares::*;
#[allow(ambiguous_glob_reexports)]
pub use view::*;
#[allow(ambiguous_glob_reexports)]
pub use withdraw::*;
