use super::prelude::*;
use crate::{
    gateways::image::{ImageGateway, ImagePath, ImageType, StoredImage},
    util::sanitize_folder_name,
};

pub const DEFAULT_IMAGE_FOLDER: &str = "general";

#[derive(Debug, Clone)]
pub struct NewImage {
    pub folder: Option<String>,
    /// MIME type as declared by the client.
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

fn image_folder(folder: Option<&str>) -> Result<String> {
    match folder {
        None => Ok(DEFAULT_IMAGE_FOLDER.to_owned()),
        Some(f) if f.trim().is_empty() => Ok(DEFAULT_IMAGE_FOLDER.to_owned()),
        Some(f) => sanitize_folder_name(f).ok_or(Error::InvalidImageFolder),
    }
}

/// Validates a path received from a client.
///
/// Only file names as they are generated on upload are accepted.
pub fn image_path(folder: &str, file_name: &str) -> Result<(ImagePath, ImageType)> {
    let folder = sanitize_folder_name(folder)
        .filter(|f| f == folder)
        .ok_or(Error::InvalidImageFolder)?;
    let (stem, ext) = file_name.rsplit_once('.').ok_or(Error::InvalidImageName)?;
    let valid_stem = !stem.is_empty()
        && stem
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid_stem {
        return Err(Error::InvalidImageName);
    }
    let image_type = ImageType::from_extension(ext).ok_or(Error::InvalidImageName)?;
    let path = ImagePath {
        folder,
        file_name: file_name.to_owned(),
    };
    Ok((path, image_type))
}

/// Checks size and type of an upload and assigns a new file name.
pub fn prepare_image_upload(new_image: &NewImage, max_size: u64) -> Result<(ImagePath, ImageType)> {
    let NewImage {
        folder,
        content_type,
        data,
    } = new_image;
    if data.is_empty() {
        return Err(Error::EmptyImage);
    }
    if data.len() as u64 > max_size {
        return Err(Error::ImageTooLarge { max_size });
    }
    let declared = content_type
        .as_deref()
        .and_then(ImageType::from_mime_type)
        .ok_or(Error::UnsupportedImageType)?;
    let detected = ImageType::sniff(data).ok_or(Error::UnsupportedImageType)?;
    if declared != detected {
        log::debug!(
            "Declared image type {} does not match content {}",
            declared.mime_type(),
            detected.mime_type()
        );
        return Err(Error::UnsupportedImageType);
    }
    let path = ImagePath {
        folder: image_folder(folder.as_deref())?,
        file_name: format!("{}.{}", Id::new(), detected.extension()),
    };
    Ok((path, detected))
}

pub fn upload_image<G: ImageGateway + ?Sized>(
    gateway: &G,
    new_image: &NewImage,
    max_size: u64,
) -> Result<StoredImage> {
    let (path, _) = prepare_image_upload(new_image, max_size)?;
    let stored = gateway.store_image(&path, &new_image.data)?;
    log::debug!("Stored image {} ({} bytes)", stored.path, stored.size);
    Ok(stored)
}

pub fn load_image<G: ImageGateway + ?Sized>(
    gateway: &G,
    folder: &str,
    file_name: &str,
) -> Result<(Vec<u8>, ImageType)> {
    let (path, image_type) = image_path(folder, file_name)?;
    let data = gateway.load_image(&path)?;
    Ok((data, image_type))
}

pub fn list_images<G: ImageGateway + ?Sized>(
    gateway: &G,
    folder: Option<&str>,
) -> Result<Vec<StoredImage>> {
    let folder = folder
        .map(|f| sanitize_folder_name(f).ok_or(Error::InvalidImageFolder))
        .transpose()?;
    let mut images = gateway.list_images(folder.as_deref())?;
    images.sort_by(|a, b| a.url.cmp(&b.url));
    Ok(images)
}

pub fn delete_image<G: ImageGateway + ?Sized>(
    gateway: &G,
    folder: &str,
    file_name: &str,
) -> Result<()> {
    let (path, _) = image_path(folder, file_name)?;
    gateway.delete_image(&path)?;
    Ok(())
}

/// Extracts the path of a locally hosted image from its public URL.
pub fn local_image_path(public_prefix: &str, url: &str) -> Option<ImagePath> {
    if !is_local_image_url(url, public_prefix) {
        return None;
    }
    let prefix = public_prefix.trim_end_matches('/');
    let rest = url.strip_prefix(prefix)?.strip_prefix('/')?;
    let (folder, file_name) = rest.split_once('/')?;
    image_path(folder, file_name).ok().map(|(path, _)| path)
}

/// Deletes a replaced or orphaned image without failing the caller.
pub fn delete_local_image_best_effort<G: ImageGateway + ?Sized>(gateway: &G, url: &str) {
    let Some(path) = local_image_path(gateway.public_prefix(), url) else {
        log::debug!("Image {} is not hosted locally", url);
        return;
    };
    if let Err(err) = gateway.delete_image(&path) {
        log::warn!("Failed to delete image {}: {}", path, err);
    }
}
