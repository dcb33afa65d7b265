//! Flag set to style tag table.
//!
//! Renderers map tags to visuals; nothing here knows about egui.

use std::collections::BTreeSet;

pub const NOTICE: &str = "notice";
pub const STAKING: &str = "staking";
pub const HIDDEN: &str = "d-none";
pub const DAPP: &str = "dapp";
pub const SHORT: &str = "short";
pub const SHORTER: &str = "shorter";
pub const MEDIUM: &str = "medium";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleTags(BTreeSet<&'static str>);

impl StyleTags {
    fn with_flags(base: &[&'static str], flags: &[(&'static str, bool)]) -> Self {
        let mut tags: BTreeSet<&'static str> = base.iter().copied().collect();
        tags.extend(flags.iter().filter(|(_, on)| *on).map(|(tag, _)| *tag));
        Self(tags)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Space separated, sorted.
    pub fn class_name(&self) -> String {
        self.0.iter().copied().collect::<Vec<_>>().join(" ")
    }
}

pub fn notice_tags(dapp: bool, visible: bool) -> StyleTags {
    StyleTags::with_flags(&[NOTICE], &[(DAPP, dapp), (HIDDEN, !visible)])
}

pub fn promotion_tags(dapp: bool, staking: bool) -> StyleTags {
    StyleTags::with_flags(&[NOTICE], &[(DAPP, dapp), (STAKING, staking)])
}

pub fn main_tags(dapp: bool, short: bool, shorter: bool, medium: bool) -> StyleTags {
    StyleTags::with_flags(
        &[],
        &[(DAPP, dapp), (SHORT, short), (SHORTER, shorter), (MEDIUM, medium)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_notice_carries_d_none() {
        let tags = notice_tags(false, false);
        assert_eq!(tags.class_name(), "d-none notice");
        assert!(!notice_tags(true, true).contains(HIDDEN));
        assert!(notice_tags(true, true).contains(DAPP));
    }

    #[test]
    fn promotion_never_hides() {
        for dapp in [false, true] {
            for staking in [false, true] {
                let tags = promotion_tags(dapp, staking);
                assert!(!tags.contains(HIDDEN));
                assert_eq!(tags.contains(STAKING), staking);
                assert_eq!(tags.contains(DAPP), dapp);
            }
        }
    }

    #[test]
    fn main_tags_are_exactly_the_set_flags() {
        assert!(main_tags(false, false, false, false).is_empty());
        let tags = main_tags(true, false, true, false);
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec![DAPP, SHORTER]);
    }
}
