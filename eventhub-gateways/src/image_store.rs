use std::{
    fs, io,
    path::{Path, PathBuf},
};

use eventhub_core::gateways::image::{
    ImageGateway, ImagePath, ImageStoreError, ImageType, Result, StoredImage,
};

/// Stores uploaded images below a root directory,
/// one sub-directory per folder.
#[derive(Debug, Clone)]
pub struct FileSystemImageStore {
    root: PathBuf,
    public_prefix: String,
}

impl FileSystemImageStore {
    pub fn try_new<P: AsRef<Path>>(root: P, public_prefix: impl Into<String>) -> io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            public_prefix: public_prefix.into(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_path(&self, path: &ImagePath) -> PathBuf {
        self.root.join(&path.folder).join(&path.file_name)
    }

    fn stored_image(&self, path: ImagePath, size: u64) -> StoredImage {
        let url = self.public_url(&path);
        StoredImage { path, url, size }
    }

    fn list_folder(&self, folder: &str, images: &mut Vec<StoredImage>) -> io::Result<()> {
        let dir = self.root.join(folder);
        if !dir.is_dir() {
            return Ok(());
        }
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            let Ok(file_name) = entry.file_name().into_string() else {
                continue;
            };
            let is_image = Path::new(&file_name)
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(ImageType::from_extension)
                .is_some();
            if !is_image {
                continue;
            }
            let path = ImagePath {
                folder: folder.to_owned(),
                file_name,
            };
            images.push(self.stored_image(path, metadata.len()));
        }
        Ok(())
    }
}

fn from_io_err(err: io::Error) -> ImageStoreError {
    if err.kind() == io::ErrorKind::NotFound {
        ImageStoreError::NotFound
    } else {
        ImageStoreError::Other(err.into())
    }
}

impl ImageGateway for FileSystemImageStore {
    fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    fn store_image(&self, path: &ImagePath, data: &[u8]) -> Result<StoredImage> {
        let file_path = self.file_path(path);
        if let Some(dir) = file_path.parent() {
            fs::create_dir_all(dir).map_err(from_io_err)?;
        }
        fs::write(&file_path, data).map_err(from_io_err)?;
        Ok(self.stored_image(path.clone(), data.len() as u64))
    }

    fn load_image(&self, path: &ImagePath) -> Result<Vec<u8>> {
        fs::read(self.file_path(path)).map_err(from_io_err)
    }

    fn list_images(&self, folder: Option<&str>) -> Result<Vec<StoredImage>> {
        let mut images = vec![];
        match folder {
            Some(folder) => self.list_folder(folder, &mut images).map_err(from_io_err)?,
            None => {
                for entry in fs::read_dir(&self.root).map_err(from_io_err)? {
                    let entry = entry.map_err(from_io_err)?;
                    if !entry.path().is_dir() {
                        continue;
                    }
                    if let Ok(folder) = entry.file_name().into_string() {
                        self.list_folder(&folder, &mut images)
                            .map_err(from_io_err)?;
                    }
                }
            }
        }
        Ok(images)
    }

    fn delete_image(&self, path: &ImagePath) -> Result<()> {
        fs::remove_file(self.file_path(path)).map_err(from_io_err)
    }
}
