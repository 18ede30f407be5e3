//! Classification of `meta` tag property names into a closed set of
//! recognized keys. Unrecognized names map to `None` and are ignored by the
//! walk rather than treated as errors.

/// Scalar metadata keys accumulated during the head walk.
///
/// `OgTitle`/`Title` and `OgDescription`/`Description` are kept as separate
/// keys so the resolver can apply Open Graph precedence after the whole head
/// has been scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaKey {
    Type,
    Url,
    OgTitle,
    SiteName,
    OgDescription,
    Description,
    Author,
    Keywords,
}

impl MetaKey {
    pub fn classify(property: &str) -> Option<Self> {
        match property {
            "og:type" => Some(MetaKey::Type),
            "og:url" => Some(MetaKey::Url),
            "og:title" => Some(MetaKey::OgTitle),
            "og:site_name" => Some(MetaKey::SiteName),
            "og:description" => Some(MetaKey::OgDescription),
            "description" => Some(MetaKey::Description),
            "author" => Some(MetaKey::Author),
            "keywords" => Some(MetaKey::Keywords),
            _ => None,
        }
    }
}

/// Image-group keys. `Start` (`og:image`) opens a new group; every other key
/// mutates the most recently opened group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKey {
    Start,
    Url,
    SecureUrl,
    MimeType,
    Width,
    Height,
    Alt,
}

impl ImageKey {
    pub fn classify(property: &str) -> Option<Self> {
        match property {
            "og:image" => Some(ImageKey::Start),
            "og:image:url" => Some(ImageKey::Url),
            "og:image:secure_url" => Some(ImageKey::SecureUrl),
            "og:image:type" => Some(ImageKey::MimeType),
            "og:image:width" => Some(ImageKey::Width),
            "og:image:height" => Some(ImageKey::Height),
            "og:image:alt" => Some(ImageKey::Alt),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_scalar_properties() {
        assert_eq!(MetaKey::classify("og:title"), Some(MetaKey::OgTitle));
        assert_eq!(MetaKey::classify("og:site_name"), Some(MetaKey::SiteName));
        assert_eq!(MetaKey::classify("description"), Some(MetaKey::Description));
        assert_eq!(MetaKey::classify("keywords"), Some(MetaKey::Keywords));
    }

    #[test]
    fn unrecognized_scalar_property_is_none() {
        assert_eq!(MetaKey::classify("og:locale"), None);
        assert_eq!(MetaKey::classify("viewport"), None);
        assert_eq!(MetaKey::classify(""), None);
    }

    #[test]
    fn recognizes_image_properties() {
        assert_eq!(ImageKey::classify("og:image"), Some(ImageKey::Start));
        assert_eq!(ImageKey::classify("og:image:width"), Some(ImageKey::Width));
        assert_eq!(
            ImageKey::classify("og:image:secure_url"),
            Some(ImageKey::SecureUrl)
        );
    }

    #[test]
    fn unknown_image_subproperty_is_none() {
        assert_eq!(ImageKey::classify("og:image:foo"), None);
        assert_eq!(ImageKey::classify("og:imagery"), None);
    }
}
