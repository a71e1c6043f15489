//! Share link encoding and decoding.
//!
//! Wire format (query parameters, `application/x-www-form-urlencoded`):
//!
//! | parameter   | value                                  |
//! |-------------|----------------------------------------|
//! | `shareView` | `true`; marks the URL as a share link  |
//! | `file`      | display name                           |
//! | `cid`       | content id                             |
//! | `protected` | `true` when a password gate applies    |
//! | `hash`      | verification material                  |
//! | `expires`   | absolute expiry, epoch milliseconds    |
//!
//! Every value goes through the same form encoding, the content id
//! included. Content ids are base58 or base32 and have nothing to escape,
//! so they appear verbatim; a malformed id is escaped rather than allowed
//! to break the query. Pairs already on the origin's query are kept ahead
//! of the share parameters.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use tracing::debug;
use url::Url;

use pinshare_core::config::share::ShareConfig;

use crate::descriptor::ShareDescriptor;
use crate::error::ShareError;

/// Query parameter names.
pub mod params {
    /// Share-view marker.
    pub const SHARE_VIEW: &str = "shareView";
    /// Display name.
    pub const FILE: &str = "file";
    /// Content id.
    pub const CID: &str = "cid";
    /// Protection flag.
    pub const PROTECTED: &str = "protected";
    /// Verification material.
    pub const HASH: &str = "hash";
    /// Expiry in epoch milliseconds.
    pub const EXPIRES: &str = "expires";
}

/// Base that relative links (a path with a query, or a bare query) are
/// resolved against before parsing.
const RELATIVE_BASE: &str = "http://localhost/";

/// Encodes descriptors into share URLs and back.
#[derive(Debug, Clone)]
pub struct LinkCodec {
    origin: Url,
}

impl LinkCodec {
    /// Creates a codec that builds links on `origin`.
    ///
    /// The origin must be an absolute URL. A fragment on it is dropped.
    pub fn new(origin: &str) -> Result<Self, ShareError> {
        let mut origin = Url::parse(origin.trim()).map_err(|e| {
            ShareError::InvalidDescriptor(format!("invalid public origin '{origin}': {e}"))
        })?;
        if origin.cannot_be_a_base() {
            return Err(ShareError::InvalidDescriptor(format!(
                "public origin '{origin}' cannot carry a query"
            )));
        }
        origin.set_fragment(None);
        Ok(Self { origin })
    }

    /// Creates a codec from the share configuration.
    pub fn from_config(config: &ShareConfig) -> Result<Self, ShareError> {
        Self::new(&config.public_origin)
    }

    /// Serializes `descriptor` into an absolute share URL.
    pub fn encode(&self, descriptor: &ShareDescriptor) -> Result<String, ShareError> {
        descriptor.validate()?;

        let mut url = self.origin.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair(params::SHARE_VIEW, "true")
                .append_pair(params::FILE, &descriptor.display_name)
                .append_pair(params::CID, &descriptor.content_id);

            if let Some(material) = descriptor.verification_material.as_deref() {
                query
                    .append_pair(params::PROTECTED, "true")
                    .append_pair(params::HASH, material);
            }

            if let Some(expires_at) = descriptor.expires_at {
                query.append_pair(params::EXPIRES, &expires_at.timestamp_millis().to_string());
            }
        }

        Ok(url.into())
    }

    /// Parses a share URL (absolute URL, path with query, or bare query).
    ///
    /// Returns `Ok(None)` when the URL is not a share link at all. Expiry is
    /// checked against `now`, so the same URL can decode today and fail
    /// tomorrow. When a parameter repeats, its first occurrence wins.
    pub fn decode(link: &str, now: DateTime<Utc>) -> Result<Option<ShareDescriptor>, ShareError> {
        let Some(url) = parse_link(link) else {
            debug!(link, "Not a parseable URL");
            return Ok(None);
        };
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        if get(params::SHARE_VIEW) != Some("true") {
            return Ok(None);
        }

        let content_id = get(params::CID)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ShareError::invalid_link("missing cid"))?;
        let display_name = get(params::FILE)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ShareError::invalid_link("missing file name"))?;

        let expires_at = match get(params::EXPIRES) {
            None => None,
            Some(raw) => {
                let millis: i64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ShareError::invalid_link("expires is not an integer"))?;
                let at = DateTime::from_timestamp_millis(millis)
                    .ok_or_else(|| ShareError::invalid_link("expires out of range"))?;
                Some(at)
            }
        };

        let is_protected = get(params::PROTECTED) == Some("true");
        let material = get(params::HASH).filter(|v| !v.is_empty());
        let verification_material = match (is_protected, material) {
            (true, Some(m)) => Some(m.to_string()),
            (false, None) => None,
            (true, None) => return Err(ShareError::invalid_link("protected without material")),
            (false, Some(_)) => {
                return Err(ShareError::invalid_link("material without protection flag"));
            }
        };

        let descriptor = ShareDescriptor {
            content_id: content_id.to_string(),
            display_name: display_name.to_string(),
            is_protected,
            verification_material,
            expires_at,
        };

        if descriptor.is_expired_at(now) {
            debug!(content_id = %descriptor.content_id, "Share link expired");
            return Err(ShareError::ExpiredLink);
        }

        Ok(Some(descriptor))
    }
}

/// Resolves `link` into a full URL. A bare `key=value&...` query gets a
/// leading `?` so it is not taken for a path.
fn parse_link(link: &str) -> Option<Url> {
    let link = link.trim();
    let candidate: Cow<'_, str> = if !link.contains('?') && link.contains('=') {
        Cow::Owned(format!("?{link}"))
    } else {
        Cow::Borrowed(link)
    };
    Url::parse(RELATIVE_BASE)
        .and_then(|base| base.join(&candidate))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const CID: &str = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";

    fn codec() -> LinkCodec {
        LinkCodec::new("https://files.example/").expect("valid origin")
    }

    #[test]
    fn test_encode_unprotected() {
        let url = codec()
            .encode(&ShareDescriptor::new(CID, "report.pdf"))
            .expect("encode");
        assert_eq!(
            url,
            format!("https://files.example/?shareView=true&file=report.pdf&cid={CID}")
        );
    }

    #[test]
    fn test_encode_escapes_name_and_material() {
        let d = ShareDescriptor::new(CID, "Q3 report & notes.pdf").protected("ab+c/d==");
        let url = codec().encode(&d).expect("encode");
        assert!(url.contains("file=Q3+report+%26+notes.pdf"));
        assert!(url.contains("&protected=true&hash=ab%2Bc%2Fd%3D%3D"));
    }

    #[test]
    fn test_cid_appears_verbatim() {
        let url = codec()
            .encode(&ShareDescriptor::new(CID, "a.txt"))
            .expect("encode");
        assert!(url.contains(&format!("&cid={CID}")));
    }

    #[test]
    fn test_origin_with_query_keeps_its_pairs() {
        let codec = LinkCodec::new("https://app.example/?v=1").expect("valid origin");
        let d = ShareDescriptor::new(CID, "report.pdf").protected("c2VjcmV0MQ==");
        let url = codec.encode(&d).expect("encode");
        assert!(url.starts_with("https://app.example/?v=1&shareView=true&"));

        let back = LinkCodec::decode(&url, Utc::now())
            .expect("decode")
            .expect("share link");
        assert_eq!(back, d);
    }

    #[test]
    fn test_origin_must_be_absolute() {
        assert!(LinkCodec::new("files.example").is_err());
        assert!(LinkCodec::new("").is_err());
        assert!(LinkCodec::new("mailto:someone@files.example").is_err());
    }

    #[test]
    fn test_origin_fragment_is_dropped() {
        let codec = LinkCodec::new("https://files.example/app#home").expect("valid origin");
        let url = codec
            .encode(&ShareDescriptor::new(CID, "a.txt"))
            .expect("encode");
        assert!(url.starts_with("https://files.example/app?shareView=true"));
        assert!(!url.contains('#'));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let url = format!("?shareView=true&file=a.txt&cid={CID}&file=b.txt");
        let d = LinkCodec::decode(&url, Utc::now())
            .expect("decode")
            .expect("share link");
        assert_eq!(d.display_name, "a.txt");
    }

    #[test]
    fn test_decode_path_and_bare_query() {
        let now = Utc::now();
        let path = format!("/share?shareView=true&file=a.txt&cid={CID}");
        let bare = format!("shareView=true&file=a.txt&cid={CID}");
        assert!(LinkCodec::decode(&path, now).expect("decode").is_some());
        assert!(LinkCodec::decode(&bare, now).expect("decode").is_some());
    }

    #[test]
    fn test_encode_expiry_as_epoch_millis() {
        let at = DateTime::from_timestamp_millis(1_767_225_600_123).expect("valid");
        let url = codec()
            .encode(&ShareDescriptor::new(CID, "a.txt").expiring_at(at))
            .expect("encode");
        assert!(url.ends_with("&expires=1767225600123"));
    }

    #[test]
    fn test_encode_rejects_missing_fields() {
        let err = codec()
            .encode(&ShareDescriptor::new("", "a.txt"))
            .expect_err("missing cid");
        assert!(matches!(err, ShareError::InvalidDescriptor(_)));
    }

    #[test]
    fn test_decode_not_a_share_link() {
        let now = Utc::now();
        assert_eq!(LinkCodec::decode("https://files.example/", now), Ok(None));
        assert_eq!(
            LinkCodec::decode("https://files.example/?shareView=false&cid=x", now),
            Ok(None)
        );
    }

    #[test]
    fn test_decode_missing_cid_is_invalid() {
        let err = LinkCodec::decode("?shareView=true&file=a.txt", Utc::now())
            .expect_err("missing cid");
        assert!(matches!(err, ShareError::InvalidLink { .. }));
    }

    #[test]
    fn test_decode_missing_name_is_invalid() {
        let err = LinkCodec::decode(&format!("?shareView=true&cid={CID}"), Utc::now())
            .expect_err("missing name");
        assert!(matches!(err, ShareError::InvalidLink { .. }));
    }

    #[test]
    fn test_decode_garbage_expiry_is_invalid() {
        let url = format!("?shareView=true&file=a.txt&cid={CID}&expires=tomorrow");
        let err = LinkCodec::decode(&url, Utc::now()).expect_err("bad expiry");
        assert!(matches!(err, ShareError::InvalidLink { .. }));
    }

    #[test]
    fn test_decode_past_expiry_is_expired() {
        let now = Utc::now();
        let past = (now - Duration::minutes(1)).timestamp_millis();
        let url = format!("?shareView=true&file=a.txt&cid={CID}&expires={past}");
        assert_eq!(LinkCodec::decode(&url, now), Err(ShareError::ExpiredLink));
    }

    #[test]
    fn test_decode_protection_invariant() {
        let now = Utc::now();
        let flag_only = format!("?shareView=true&file=a.txt&cid={CID}&protected=true");
        let hash_only = format!("?shareView=true&file=a.txt&cid={CID}&hash=abc");
        assert!(LinkCodec::decode(&flag_only, now).is_err());
        assert!(LinkCodec::decode(&hash_only, now).is_err());
    }

    #[test]
    fn test_decode_plus_and_fragment() {
        let url = format!("https://x.example/?shareView=true&file=my+file.txt&cid={CID}#top");
        let d = LinkCodec::decode(&url, Utc::now())
            .expect("decode")
            .expect("share link");
        assert_eq!(d.display_name, "my file.txt");
        assert_eq!(d.content_id, CID);
    }

    #[test]
    fn test_legacy_link_from_older_client() {
        // Older clients appended the base64 material without escaping it.
        let url = format!(
            "https://x.example?shareView=true&file=report.pdf&cid={CID}&protected=true&hash=c2VjcmV0MQ=="
        );
        let d = LinkCodec::decode(&url, Utc::now())
            .expect("decode")
            .expect("share link");
        assert_eq!(d.verification_material.as_deref(), Some("c2VjcmV0MQ=="));
    }

    #[test]
    fn test_round_trip_keeps_fields() {
        let now = Utc::now();
        let d = ShareDescriptor::new(CID, "Résumé (final) #2.pdf")
            .protected("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA")
            .expiring_at(now + Duration::days(1));
        let url = codec().encode(&d).expect("encode");
        let back = LinkCodec::decode(&url, now).expect("decode").expect("share");
        assert_eq!(back, d);
    }
}
