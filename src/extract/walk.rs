//! Single forward pass over the HTML token stream.
//!
//! `HeadWalker` is a `html5ever` token sink that scans start tags until the
//! closing `</head>` tag (or end of input, which is not an error: many pages
//! never close their head). It collects scalar properties into a raw
//! accumulator and builds the ordered image-group sequence; precedence and
//! URL resolution happen later in the resolver.

use std::collections::HashMap;

use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{Tag, TagKind, Token, TokenSink, TokenSinkResult};

use crate::extract::properties::{ImageKey, MetaKey};
use crate::models::PreviewImage;

/// Everything the walk accumulates before finalization. Passed explicitly to
/// the resolver; no state is shared across requests.
#[derive(Debug, Clone, Default)]
pub struct RawHead {
    /// Scalar properties, last write wins for duplicate keys.
    pub metas: HashMap<MetaKey, String>,
    /// `<title>` text, lower precedence than `og:title`.
    pub title_fallback: Option<String>,
    /// `<link rel="icon">` target.
    pub icon: Option<PreviewImage>,
    /// Image groups in the order their `og:image` tag appeared.
    pub images: Vec<PreviewImage>,
}

#[derive(Default)]
pub struct HeadWalker {
    head: RawHead,
    done: bool,
    in_title: bool,
}

impl HeadWalker {
    pub fn done(&self) -> bool {
        self.done
    }

    pub fn take_raw(&mut self) -> RawHead {
        std::mem::take(&mut self.head)
    }

    /// Handle one `<meta>` tag. All attributes are scanned before anything
    /// is committed, so attribute order within the tag does not matter.
    fn handle_meta(&mut self, tag: &Tag) {
        if tag.attrs.iter().any(|a| a.value.starts_with("og:image")) {
            self.handle_image_meta(tag);
            return;
        }

        let mut key = None;
        let mut content = None;
        for attr in &tag.attrs {
            match &*attr.name.local {
                "property" | "name" => {
                    if key.is_none() {
                        key = MetaKey::classify(&attr.value);
                    }
                }
                "content" => content = Some(String::from(&*attr.value)),
                _ => {}
            }
        }

        if let (Some(key), Some(content)) = (key, content) {
            self.head.metas.insert(key, content);
        }
    }

    /// Handle one `og:image*` tag. `og:image` opens a new group; every other
    /// sub-property mutates the most recently opened group and is dropped if
    /// no group is open yet.
    fn handle_image_meta(&mut self, tag: &Tag) {
        let mut key = None;
        let mut content = None;
        for attr in &tag.attrs {
            match &*attr.name.local {
                "property" | "name" => {
                    if key.is_none() {
                        key = ImageKey::classify(&attr.value);
                    }
                }
                "content" => content = Some(String::from(&*attr.value)),
                _ => {}
            }
        }

        let (Some(key), Some(content)) = (key, content) else {
            return;
        };

        if key == ImageKey::Start {
            self.head.images.push(PreviewImage {
                url: Some(content),
                ..Default::default()
            });
            return;
        }

        let Some(image) = self.head.images.last_mut() else {
            return;
        };
        match key {
            ImageKey::Start => unreachable!(),
            ImageKey::Url => {
                if image.url.is_none() {
                    image.url = Some(content);
                }
            }
            ImageKey::SecureUrl => image.secure_url = Some(content),
            ImageKey::MimeType => image.mime_type = Some(content),
            ImageKey::Width => {
                if let Ok(width) = content.trim().parse() {
                    image.width = Some(width);
                }
            }
            ImageKey::Height => {
                if let Ok(height) = content.trim().parse() {
                    image.height = Some(height);
                }
            }
            ImageKey::Alt => image.alt = Some(content),
        }
    }

    fn handle_link(&mut self, tag: &Tag) {
        let mut is_icon = false;
        let mut href = None;
        for attr in &tag.attrs {
            match &*attr.name.local {
                "rel" => is_icon = &*attr.value == "icon",
                "href" => href = Some(String::from(&*attr.value)),
                _ => {}
            }
        }

        if is_icon {
            if let Some(href) = href {
                self.head.icon.get_or_insert_with(PreviewImage::default).url = Some(href);
            }
        }
    }
}

impl TokenSink for HeadWalker {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        if self.done {
            return TokenSinkResult::Continue;
        }

        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => match &*tag.name {
                    "meta" => self.handle_meta(&tag),
                    "link" => self.handle_link(&tag),
                    "title" if !tag.self_closing => {
                        self.in_title = true;
                        // title content is RCDATA; the tokenizer needs to be
                        // told, or entities and stray brackets inside the
                        // title would be retokenized as markup
                        return TokenSinkResult::RawData(RawKind::Rcdata);
                    }
                    _ => {}
                },
                TagKind::EndTag => {
                    self.in_title = false;
                    if &*tag.name == "head" {
                        self.done = true;
                    }
                }
            },
            Token::CharacterTokens(text) => {
                if self.in_title {
                    self.head
                        .title_fallback
                        .get_or_insert_with(String::new)
                        .push_str(&text);
                }
            }
            Token::EOFToken => {
                // truncated documents still yield whatever was seen
                self.done = true;
            }
            Token::ParseError(e) => {
                tracing::trace!(error = %e, "tokenizer recovered from malformed markup");
            }
            _ => {}
        }

        TokenSinkResult::Continue
    }
}
