//! URL fragment codec
//!
//! The query is mirrored into the page URL's fragment so a filtered view can
//! be shared and restored. Only the query travels; field scope and the
//! ownership toggle stay local.

use url::Url;

use crate::error::{CoreError, Result};

/// Where the current page address lives
pub trait Location {
    /// Raw (still percent-encoded) fragment, without the leading `#`
    fn fragment(&self) -> Option<&str>;

    /// Replace the fragment in place, without recording a history entry
    fn replace_fragment(&mut self, fragment: &str);
}

impl Location for Url {
    fn fragment(&self) -> Option<&str> {
        Url::fragment(self)
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.set_fragment(Some(fragment));
    }
}

/// Percent-encode `query` and store it as the fragment
pub fn encode<L: Location + ?Sized>(location: &mut L, query: &str) {
    let encoded = urlencoding::encode(query);
    location.replace_fragment(&encoded);
}

/// Decode the fragment back into a query. An absent fragment is an empty query.
pub fn try_decode<L: Location + ?Sized>(location: &L) -> Result<String> {
    let Some(raw) = location.fragment() else {
        return Ok(String::new());
    };

    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| CoreError::InvalidFragment {
            message: e.to_string(),
        })
}

/// Like [`try_decode`], but an undecodable fragment counts as no query
pub fn decode<L: Location + ?Sized>(location: &L) -> String {
    try_decode(location).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring undecodable URL fragment");
        String::new()
    })
}
