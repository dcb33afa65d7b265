pub mod account;
pub mod contracts;
pub mod domain;
pub mod links;
pub mod opt_in;
pub mod ports;
pub mod shell;
pub mod style;

pub use account::{fetch_account_flags, fetch_stakes, RebaseOption};
pub use domain::{
    AccountFlags, ConnectorKind, ContractHandle, ContractRegistry, Session, StakeList,
    StakeRecord, TimestampMs, TransactionRecord, TxMetadata, TxRequest, OUSD_ASSET,
    OUSD_CONTRACT, REBASE_OPT_IN_LABEL, STAKING_CONTRACT, USER_REJECTED_CODE,
};
pub use links::LinkResolver;
pub use opt_in::{rebase_opt_in, OptInFailure, TransactionOutcome};
pub use ports::{PortError, ProviderPort, TransactionLogPort};
pub use shell::{
    BannerAction, Banners, FooterChoice, HeadMetadata, NoticeBanner, PageShell, PageShellProps,
    PromotionBanner, PromotionVariant, ShellAction, ShellState,
};
pub use style::StyleTags;
