//! Inline image extraction and conversion.
//!
//! Only inline base64 data reaches the backend; URL references are dropped.

use kiro_core::{Content, ContentBlock, ContentPart, ImageSource, UnifiedImage};
use log::warn;

use crate::models::{KiroImage, KiroImageSource};

const DEFAULT_MEDIA_TYPE: &str = "image/jpeg";

/// Collect inline images from `image` and `image_url` parts.
///
/// `image_url` values must be `data:` URLs; anything else non-empty is taken as
/// raw base64 JPEG data. Images referenced by http(s) URL are skipped.
pub fn extract_images_from_content(content: &Content) -> Vec<UnifiedImage> {
    let Some(parts) = content.parts() else {
        return Vec::new();
    };

    parts
        .iter()
        .filter_map(|part| match part {
            ContentPart::Block(ContentBlock::Image { source }) => image_from_source(source),
            ContentPart::Block(ContentBlock::ImageUrl { image_url }) => {
                image_from_url(&image_url.url)
            }
            _ => None,
        })
        .collect()
}

fn image_from_source(source: &ImageSource) -> Option<UnifiedImage> {
    match source {
        ImageSource::Base64 { media_type, data } => Some(UnifiedImage {
            media_type: media_type
                .clone()
                .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string()),
            data: data.clone(),
        }),
        ImageSource::Url { url } => {
            warn!("URL-based images are not supported, skipping: {}", url);
            None
        }
    }
}

fn image_from_url(url: &str) -> Option<UnifiedImage> {
    if let Some(rest) = url.strip_prefix("data:") {
        return match parse_data_url(rest) {
            Some(image) => Some(image),
            None => {
                warn!("Malformed data URL in image_url, skipping");
                None
            }
        };
    }

    if url.starts_with("http://") || url.starts_with("https://") {
        warn!("URL-based images are not supported, skipping: {}", url);
        return None;
    }

    if url.is_empty() {
        return None;
    }

    Some(UnifiedImage {
        media_type: DEFAULT_MEDIA_TYPE.to_string(),
        data: url.to_string(),
    })
}

// `image/png;base64,AAAA`
fn parse_data_url(rest: &str) -> Option<UnifiedImage> {
    let (header, data) = rest.split_once(',')?;
    let media_type = header.split(';').next().unwrap_or_default();

    Some(UnifiedImage {
        media_type: if media_type.is_empty() {
            DEFAULT_MEDIA_TYPE.to_string()
        } else {
            media_type.to_string()
        },
        data: data.to_string(),
    })
}

/// Convert unified images to backend form.
///
/// `format` is the media subtype (`image/png` -> `png`). Images with no data are
/// dropped.
pub fn convert_images_to_kiro_format(images: &[UnifiedImage]) -> Vec<KiroImage> {
    images
        .iter()
        .filter_map(|image| {
            let mut data = image.data.as_str();
            if let Some(rest) = data.strip_prefix("data:") {
                data = rest.split_once(',').map(|(_, d)| d).unwrap_or_default();
            }

            if data.is_empty() {
                warn!("Skipping image with empty data ({})", image.media_type);
                return None;
            }

            let format = image
                .media_type
                .rsplit_once('/')
                .map(|(_, subtype)| subtype)
                .unwrap_or(&image.media_type);

            Some(KiroImage {
                format: format.to_string(),
                source: KiroImageSource {
                    bytes: data.to_string(),
                },
            })
        })
        .collect()
}

/// Images of a turn: decoder-provided ones if any, else those found in content
pub fn resolve_images(content: &Content, images: Option<&[UnifiedImage]>) -> Vec<UnifiedImage> {
    match images {
        Some(images) if !images.is_empty() => images.to_vec(),
        _ => extract_images_from_content(content),
    }
}

/// [`resolve_images`] in backend form
pub fn message_images(content: &Content, images: Option<&[UnifiedImage]>) -> Vec<KiroImage> {
    convert_images_to_kiro_format(&resolve_images(content, images))
}
