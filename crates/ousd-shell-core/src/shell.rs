//! Page shell composition: head metadata, notice banners, main area, footer choice.
//!
//! Everything here is a pure function of [`PageShellProps`] and a [`ShellState`]
//! snapshot, so renderers can be swapped without touching the decisions.

use crate::domain::{ContractHandle, Session, StakeList};
use crate::links::LinkResolver;
use crate::style::{self, StyleTags};

pub const PAGE_TITLE: &str = "OUSD";
pub const VIEWPORT: &str = "width=device-width, initial-scale=1.0";

pub const AIRDROP_URL: &str = "https://governance.ousd.com/claim";
pub const UNISWAP_URL: &str = "https://app.uniswap.org/#/swap?inputCurrency=0xdac17f958d2ee523a2206206994597c13d831ec7&outputCurrency=0x2A8e1E676Ec238d8A992307B495b45B3fEAa5e86";
pub const LEGACY_STAKING_HREF: &str = "/earn";

const STAKING_OG_IMAGE: &str = "https://ousd.com/images/staking-facebook.png";
const STAKING_TWITTER_IMAGE: &str = "https://ousd.com/images/staking-twitter.png";
const SHARE_OG_IMAGE: &str = "https://ousd.com/images/share-facebook.png";
const SHARE_TWITTER_IMAGE: &str = "https://ousd.com/images/share-twitter.png";

const OPT_IN_ICON: &str = "/images/gnosis-safe-icon.svg";
const UNISWAP_ICON: &str = "/images/horsey.svg";

pub const OPT_IN_NOTICE: &str = "It looks like you are minting from a contract and have not opted into yield. You must opt in to receive yield.";
pub const UNISWAP_NOTICE: &str =
    "Gas fees are high right now. It might be cheaper to buy OUSD on Uniswap.";
pub const STAKING_TITLE: &str = "Changes are coming to OGN staking.";
pub const STAKING_NOTICE: &str = "Your existing stakes will not be impacted. Claim your OGN at the end of your staking period.";
pub const AIRDROP_NOTICE: &str = "OGV airdrop is live!";

/// Caller-supplied layout inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageShellProps {
    pub locale: String,
    pub dapp: bool,
    pub short: bool,
    pub shorter: bool,
    pub medium: bool,
    pub is_stake_page: bool,
    pub show_uniswap_notice: bool,
}

impl Default for PageShellProps {
    fn default() -> Self {
        Self {
            locale: "en_US".to_owned(),
            dapp: false,
            short: false,
            shorter: false,
            medium: false,
            is_stake_page: false,
            show_uniswap_notice: false,
        }
    }
}

/// Snapshot of the store slices the shell reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellState {
    pub session: Session,
    pub rebase_opted_out: bool,
    pub ousd_contract: Option<ContractHandle>,
    pub stakes: StakeList,
}

/// What the user asked for while the shell was rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    OptIn,
    SetLocale(String),
    OpenExternal(String),
    Navigate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BannerAction {
    OptIn { label: &'static str },
    ExternalLink { label: &'static str, url: String },
    InternalLink { label: &'static str, href: String },
}

impl BannerAction {
    pub fn label(&self) -> &'static str {
        match self {
            BannerAction::OptIn { label }
            | BannerAction::ExternalLink { label, .. }
            | BannerAction::InternalLink { label, .. } => *label,
        }
    }

    pub fn to_shell_action(&self) -> ShellAction {
        match self {
            BannerAction::OptIn { .. } => ShellAction::OptIn,
            BannerAction::ExternalLink { url, .. } => ShellAction::OpenExternal(url.clone()),
            BannerAction::InternalLink { href, .. } => ShellAction::Navigate(href.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeBanner {
    pub visible: bool,
    pub icon: String,
    pub message: &'static str,
    pub action: BannerAction,
    pub tags: StyleTags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionVariant {
    Staking,
    Airdrop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionBanner {
    pub variant: PromotionVariant,
    pub title: Option<&'static str>,
    pub message: &'static str,
    pub action: BannerAction,
    pub tags: StyleTags,
}

/// The three stacked notice regions, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banners {
    pub opt_in: NoticeBanner,
    pub uniswap: NoticeBanner,
    pub promotion: PromotionBanner,
}

impl Banners {
    pub fn visible_count(&self) -> usize {
        1 + usize::from(self.opt_in.visible) + usize::from(self.uniswap.visible)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FooterChoice {
    App { dapp: bool, locale: String },
    Marketing { locale: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadMetadata {
    pub title: &'static str,
    pub viewport: &'static str,
    pub og_image: &'static str,
    pub twitter_image: &'static str,
}

#[derive(Debug, Clone)]
pub struct PageShell {
    props: PageShellProps,
    state: ShellState,
    links: LinkResolver,
}

impl PageShell {
    pub fn new(props: PageShellProps, state: ShellState, links: LinkResolver) -> Self {
        Self {
            props,
            state,
            links,
        }
    }

    pub fn show_staking_banner(&self) -> bool {
        !self.state.stakes.is_empty() && !self.props.is_stake_page
    }

    pub fn head(&self) -> HeadMetadata {
        let (og_image, twitter_image) = if self.props.is_stake_page {
            (STAKING_OG_IMAGE, STAKING_TWITTER_IMAGE)
        } else {
            (SHARE_OG_IMAGE, SHARE_TWITTER_IMAGE)
        };
        HeadMetadata {
            title: PAGE_TITLE,
            viewport: VIEWPORT,
            og_image,
            twitter_image,
        }
    }

    pub fn render_banners(&self) -> Banners {
        let dapp = self.props.dapp;
        let opt_in_visible = self.state.rebase_opted_out;
        let uniswap_visible = self.props.show_uniswap_notice;
        let staking = self.show_staking_banner();

        let promotion = if staking {
            PromotionBanner {
                variant: PromotionVariant::Staking,
                title: Some(STAKING_TITLE),
                message: STAKING_NOTICE,
                action: BannerAction::InternalLink {
                    label: "Legacy staking",
                    href: self.links.adjust_link_href(LEGACY_STAKING_HREF),
                },
                tags: style::promotion_tags(dapp, true),
            }
        } else {
            PromotionBanner {
                variant: PromotionVariant::Airdrop,
                title: None,
                message: AIRDROP_NOTICE,
                action: BannerAction::ExternalLink {
                    label: "Check eligibility",
                    url: AIRDROP_URL.to_owned(),
                },
                tags: style::promotion_tags(dapp, false),
            }
        };

        Banners {
            opt_in: NoticeBanner {
                visible: opt_in_visible,
                icon: self.links.asset_root_path(OPT_IN_ICON),
                message: OPT_IN_NOTICE,
                action: BannerAction::OptIn { label: "Opt in" },
                tags: style::notice_tags(dapp, opt_in_visible),
            },
            uniswap: NoticeBanner {
                visible: uniswap_visible,
                icon: self.links.asset_root_path(UNISWAP_ICON),
                message: UNISWAP_NOTICE,
                action: BannerAction::ExternalLink {
                    label: "Try Uniswap",
                    url: UNISWAP_URL.to_owned(),
                },
                tags: style::notice_tags(dapp, uniswap_visible),
            },
            promotion,
        }
    }

    pub fn main_tags(&self) -> StyleTags {
        style::main_tags(
            self.props.dapp,
            self.props.short,
            self.props.shorter,
            self.props.medium,
        )
    }

    /// Dapp mode wraps the page content in the fixed-width container.
    pub fn wraps_children(&self) -> bool {
        self.props.dapp
    }

    pub fn render_footer(&self) -> FooterChoice {
        if self.props.dapp {
            FooterChoice::App {
                dapp: true,
                locale: self.props.locale.clone(),
            }
        } else {
            FooterChoice::Marketing {
                locale: self.props.locale.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StakeRecord;
    use alloy::primitives::U256;

    fn stakes(n: usize) -> StakeList {
        StakeList {
            stakes: (0..n)
                .map(|i| StakeRecord {
                    amount: U256::from(1_000u64),
                    end: 1_700_000_000 + i as u64,
                    duration: 30 * 86_400,
                    rate: U256::ZERO,
                    paid: false,
                    stake_type: 0,
                })
                .collect(),
        }
    }

    fn shell(props: PageShellProps, state: ShellState) -> PageShell {
        PageShell::new(props, state, LinkResolver::default())
    }

    #[test]
    fn opt_in_banner_tracks_flag() {
        for flag in [false, true] {
            let state = ShellState {
                rebase_opted_out: flag,
                ..ShellState::default()
            };
            let banners = shell(PageShellProps::default(), state).render_banners();
            assert_eq!(banners.opt_in.visible, flag);
            assert_eq!(banners.opt_in.tags.contains(style::HIDDEN), !flag);
            assert_eq!(banners.opt_in.action.to_shell_action(), ShellAction::OptIn);
        }
    }

    #[test]
    fn uniswap_banner_tracks_flag() {
        for flag in [false, true] {
            let props = PageShellProps {
                show_uniswap_notice: flag,
                ..PageShellProps::default()
            };
            let banners = shell(props, ShellState::default()).render_banners();
            assert_eq!(banners.uniswap.visible, flag);
            assert_eq!(
                banners.uniswap.action.to_shell_action(),
                ShellAction::OpenExternal(UNISWAP_URL.to_owned())
            );
        }
    }

    #[test]
    fn staking_banner_needs_stakes_and_another_page() {
        let cases = [
            (0, false, false),
            (0, true, false),
            (2, false, true),
            (2, true, false),
        ];
        for (count, is_stake_page, expected) in cases {
            let props = PageShellProps {
                is_stake_page,
                ..PageShellProps::default()
            };
            let state = ShellState {
                stakes: stakes(count),
                ..ShellState::default()
            };
            let page = shell(props, state);
            assert_eq!(page.show_staking_banner(), expected);
            let variant = page.render_banners().promotion.variant;
            let want = if expected {
                PromotionVariant::Staking
            } else {
                PromotionVariant::Airdrop
            };
            assert_eq!(variant, want);
        }
    }

    #[test]
    fn empty_stakes_off_stake_page_show_airdrop() {
        let banners = shell(PageShellProps::default(), ShellState::default()).render_banners();
        assert_eq!(banners.promotion.variant, PromotionVariant::Airdrop);
        assert_eq!(banners.promotion.message, AIRDROP_NOTICE);
        assert!(banners.promotion.title.is_none());
        assert!(!banners.promotion.tags.contains(style::STAKING));
        assert_eq!(banners.visible_count(), 1);
    }

    #[test]
    fn staking_variant_links_to_adjusted_legacy_page() {
        let state = ShellState {
            stakes: stakes(1),
            ..ShellState::default()
        };
        let page = PageShell::new(
            PageShellProps::default(),
            state,
            LinkResolver::new("", "/dapp"),
        );
        let promotion = page.render_banners().promotion;
        assert_eq!(promotion.title, Some(STAKING_TITLE));
        assert_eq!(
            promotion.action.to_shell_action(),
            ShellAction::Navigate("/dapp/earn".to_owned())
        );
    }

    #[test]
    fn footer_is_exclusive_on_dapp_flag() {
        let app = shell(
            PageShellProps {
                dapp: true,
                locale: "fr_FR".to_owned(),
                ..PageShellProps::default()
            },
            ShellState::default(),
        );
        assert_eq!(
            app.render_footer(),
            FooterChoice::App {
                dapp: true,
                locale: "fr_FR".to_owned()
            }
        );
        assert!(app.wraps_children());

        let marketing = shell(PageShellProps::default(), ShellState::default());
        assert!(matches!(
            marketing.render_footer(),
            FooterChoice::Marketing { .. }
        ));
        assert!(!marketing.wraps_children());
    }

    #[test]
    fn head_images_follow_stake_page() {
        let stake_page = shell(
            PageShellProps {
                is_stake_page: true,
                ..PageShellProps::default()
            },
            ShellState::default(),
        );
        assert_eq!(stake_page.head().og_image, STAKING_OG_IMAGE);
        assert_eq!(stake_page.head().twitter_image, STAKING_TWITTER_IMAGE);

        let home = shell(PageShellProps::default(), ShellState::default()).head();
        assert_eq!(home.title, "OUSD");
        assert_eq!(home.og_image, SHARE_OG_IMAGE);
        assert_eq!(home.twitter_image, SHARE_TWITTER_IMAGE);
    }

    #[test]
    fn dapp_flag_reaches_every_banner() {
        let banners = shell(
            PageShellProps {
                dapp: true,
                show_uniswap_notice: true,
                ..PageShellProps::default()
            },
            ShellState::default(),
        )
        .render_banners();
        assert!(banners.opt_in.tags.contains(style::DAPP));
        assert!(banners.uniswap.tags.contains(style::DAPP));
        assert!(banners.promotion.tags.contains(style::DAPP));
    }
}
