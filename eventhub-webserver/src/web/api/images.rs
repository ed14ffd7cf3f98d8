use super::*;
use eventhub_boundary::Image;
use eventhub_core::gateways::image::StoredImage;
use rocket::{form::Form, fs::TempFile, http::ContentType, tokio::io::AsyncReadExt, FromForm};

fn image_json(image: StoredImage) -> Image {
    let StoredImage { path, url, size } = image;
    Image {
        url,
        folder: path.folder,
        file_name: path.file_name,
        size,
    }
}

#[derive(FromForm)]
pub struct Upload<'r> {
    image: TempFile<'r>,
}

async fn read_upload(file: &TempFile<'_>) -> result::Result<Vec<u8>, ApiError> {
    let mut reader = Box::pin(file.open().await?);
    let mut data = Vec::new();
    reader.read_to_end(&mut data).await?;
    Ok(data)
}

async fn store_upload(
    images: &Images,
    cfg: &Cfg,
    folder: Option<String>,
    upload: Upload<'_>,
) -> Result<Image> {
    let Upload { image } = upload;
    let content_type = image
        .content_type()
        .map(|ct| format!("{}/{}", ct.top(), ct.sub()));
    let data = read_upload(&image).await?;
    let new_image = usecases::NewImage {
        folder,
        content_type,
        data,
    };
    let stored = usecases::upload_image(&**images, &new_image, cfg.max_image_size)?;
    info!("Uploaded image {}", stored.path);
    Ok(Json(
        ApiResponse::ok(image_json(stored)).with_message("Image uploaded"),
    ))
}

#[get("/image/<folder>/<file_name>", rank = 2)]
pub fn get_image(
    images: &State<Images>,
    folder: &str,
    file_name: &str,
) -> result::Result<(ContentType, Vec<u8>), ApiError> {
    let (data, image_type) = usecases::load_image(&**images.inner(), folder, file_name)?;
    let content_type =
        ContentType::parse_flexible(image_type.mime_type()).unwrap_or(ContentType::Binary);
    Ok((content_type, data))
}

#[get("/image/list")]
pub fn get_images(images: &State<Images>) -> Result<Vec<Image>> {
    let stored = usecases::list_images(&**images.inner(), None)?;
    ok(stored.into_iter().map(image_json).collect())
}

#[get("/image/list/<folder>")]
pub fn get_images_in_folder(images: &State<Images>, folder: &str) -> Result<Vec<Image>> {
    let stored = usecases::list_images(&**images.inner(), Some(folder))?;
    ok(stored.into_iter().map(image_json).collect())
}

#[post("/image/add", data = "<upload>")]
pub async fn post_image(
    _account: Account,
    images: &State<Images>,
    cfg: &State<Cfg>,
    upload: Form<Upload<'_>>,
) -> Result<Image> {
    store_upload(images.inner(), cfg.inner(), None, upload.into_inner()).await
}

#[post("/image/add/<folder>", data = "<upload>")]
pub async fn post_image_into_folder(
    _account: Account,
    images: &State<Images>,
    cfg: &State<Cfg>,
    folder: &str,
    upload: Form<Upload<'_>>,
) -> Result<Image> {
    let folder = Some(folder.to_owned());
    store_upload(images.inner(), cfg.inner(), folder, upload.into_inner()).await
}

#[delete("/image/delete/<folder>/<file_name>")]
pub fn delete_image(
    _account: Account,
    images: &State<Images>,
    folder: &str,
    file_name: &str,
) -> MessageResult {
    usecases::delete_image(&**images.inner(), folder, file_name)?;
    info!("Deleted image {}/{}", folder, file_name);
    done("Image deleted")
}
