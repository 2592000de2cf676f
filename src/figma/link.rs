//! Helpers for linking to the Figma web editor.

use url::Url;

/// The base URL of the Figma web editor.
const WEB_BASE: &str = "https://www.figma.com";

/// Get a link that opens a file in the editor, focused on a given node.
pub fn node_url(file_key: &str, node_id: &str) -> Url {
    let str = format!("{}/file/{}", WEB_BASE, file_key);

    // This unwrap is tested below.
    Url::parse_with_params(str.as_ref(), &[("node-id", node_id)]).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn test_node_url() {
        assert_eq!(
            node_url("abcKEY", "1:2").as_str(),
            "https://www.figma.com/file/abcKEY?node-id=1%3A2"
        );
    }

    quickcheck! {
        fn test_node_url_never_panics(key: String, id: String) -> () {
            node_url(&key, &id);
        }
    }
}
