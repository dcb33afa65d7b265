/// Resolves static asset paths and internal page links against the deployment layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkResolver {
    pub asset_root: String,
    pub base_path: String,
}

impl LinkResolver {
    pub fn new(asset_root: impl Into<String>, base_path: impl Into<String>) -> Self {
        Self {
            asset_root: asset_root.into(),
            base_path: base_path.into(),
        }
    }

    pub fn asset_root_path(&self, path: &str) -> String {
        join(&self.asset_root, path)
    }

    /// Internal links only; absolute URLs pass through untouched.
    pub fn adjust_link_href(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            return href.to_owned();
        }
        join(&self.base_path, href)
    }
}

fn join(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{prefix}{path}")
    } else {
        format!("{prefix}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::LinkResolver;

    #[test]
    fn empty_prefixes_keep_root_relative_paths() {
        let links = LinkResolver::default();
        assert_eq!(links.asset_root_path("/images/horsey.svg"), "/images/horsey.svg");
        assert_eq!(links.adjust_link_href("/earn"), "/earn");
    }

    #[test]
    fn prefixes_are_joined_with_one_slash() {
        let links = LinkResolver::new("https://cdn.ousd.com/", "/dapp");
        assert_eq!(
            links.asset_root_path("/images/horsey.svg"),
            "https://cdn.ousd.com/images/horsey.svg"
        );
        assert_eq!(links.adjust_link_href("earn"), "/dapp/earn");
        assert_eq!(
            links.adjust_link_href("https://governance.ousd.com/claim"),
            "https://governance.ousd.com/claim"
        );
    }
}
