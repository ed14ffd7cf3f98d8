pub mod prelude {
    use std::{cell::RefCell, collections::HashSet};

    pub use eventhub_core::{
        entities::{
            booking::*, category::*, entity_ref::*, event::*, id::Id, review::*,
            session::Session, tag::*, user::*, zone::*,
        },
        gateways::{
            identity::{IdentityError, IdentityGateway, Result as IdentityResult},
            image::{
                ImageGateway, ImagePath, ImageStoreError, Result as ImageResult, StoredImage,
            },
        },
        repositories::{Error as RepoError, *},
        usecases,
    };

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub use crate::{error::AppError, prelude as flows};

    #[derive(Default)]
    pub struct MockIdentity {
        identities: RefCell<Vec<(Id, String, String)>>,
    }

    impl MockIdentity {
        pub fn count(&self) -> usize {
            self.identities.borrow().len()
        }
    }

    impl IdentityGateway for MockIdentity {
        fn sign_up(&self, email: &str, password: &str) -> IdentityResult<Id> {
            let mut identities = self.identities.borrow_mut();
            if identities.iter().any(|(_, e, _)| e == email) {
                return Err(IdentityError::EmailTaken);
            }
            let uid = Id::new();
            identities.push((uid.clone(), email.into(), password.into()));
            Ok(uid)
        }
        fn sign_in(&self, email: &str, password: &str) -> IdentityResult<Id> {
            self.identities
                .borrow()
                .iter()
                .find(|(_, e, p)| e == email && p == password)
                .map(|(uid, _, _)| uid.clone())
                .ok_or(IdentityError::InvalidCredentials)
        }
        fn update_password(&self, uid: &Id, password: &str) -> IdentityResult<()> {
            let mut identities = self.identities.borrow_mut();
            let identity = identities
                .iter_mut()
                .find(|(id, _, _)| id == uid)
                .ok_or(IdentityError::NotFound)?;
            identity.2 = password.into();
            Ok(())
        }
        fn delete(&self, uid: &Id) -> IdentityResult<()> {
            let mut identities = self.identities.borrow_mut();
            let len = identities.len();
            identities.retain(|(id, _, _)| id != uid);
            if identities.len() == len {
                return Err(IdentityError::NotFound);
            }
            Ok(())
        }
    }

    /// Only tracks which files exist.
    #[derive(Default)]
    pub struct MockImages {
        files: RefCell<HashSet<ImagePath>>,
    }

    impl MockImages {
        pub fn add(&self, folder: &str, file_name: &str) {
            self.files.borrow_mut().insert(path(folder, file_name));
        }
        pub fn contains(&self, folder: &str, file_name: &str) -> bool {
            self.files.borrow().contains(&path(folder, file_name))
        }
    }

    fn path(folder: &str, file_name: &str) -> ImagePath {
        ImagePath {
            folder: folder.into(),
            file_name: file_name.into(),
        }
    }

    impl ImageGateway for MockImages {
        fn public_prefix(&self) -> &str {
            "/api/image"
        }
        fn store_image(&self, path: &ImagePath, data: &[u8]) -> ImageResult<StoredImage> {
            self.files.borrow_mut().insert(path.clone());
            Ok(StoredImage {
                path: path.clone(),
                url: self.public_url(path),
                size: data.len() as u64,
            })
        }
        fn load_image(&self, path: &ImagePath) -> ImageResult<Vec<u8>> {
            if self.files.borrow().contains(path) {
                Ok(vec![])
            } else {
                Err(ImageStoreError::NotFound)
            }
        }
        fn list_images(&self, folder: Option<&str>) -> ImageResult<Vec<StoredImage>> {
            Ok(self
                .files
                .borrow()
                .iter()
                .filter(|p| folder.map(|f| p.folder == f).unwrap_or(true))
                .map(|p| StoredImage {
                    path: p.clone(),
                    url: self.public_url(p),
                    size: 0,
                })
                .collect())
        }
        fn delete_image(&self, path: &ImagePath) -> ImageResult<()> {
            if self.files.borrow_mut().remove(path) {
                Ok(())
            } else {
                Err(ImageStoreError::NotFound)
            }
        }
    }

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
        pub identity: MockIdentity,
        pub images: MockImages,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
            eventhub_db_sqlite::run_embedded_database_migrations(
                db_connections.exclusive().unwrap(),
            )
            .unwrap();
            Self {
                db_connections,
                identity: MockIdentity::default(),
                images: MockImages::default(),
            }
        }

        /// Stores a profile without an identity and returns its session.
        pub fn create_user(&self, email: &str, role: Role) -> Session {
            let user = User {
                id: Id::new(),
                email: email.into(),
                name: email.split('@').next().unwrap_or_default().into(),
                role,
                bio: None,
                interests: vec![],
                profile_image: None,
            };
            self.db_connections
                .exclusive()
                .unwrap()
                .transaction(|conn| conn.create_user(&user))
                .unwrap();
            Session {
                user_id: user.id,
                email: user.email,
                role,
            }
        }

        pub fn create_event(&self, session: &Session, name: &str) -> String {
            let new_event = usecases::NewEvent {
                name: name.into(),
                date: Some("2030-05-01".into()),
                time: Some("20:00".into()),
                location: Some(usecases::NewLocation {
                    zone: Some(EntityRef::ByName("Center".into())),
                    ..Default::default()
                }),
                ..Default::default()
            };
            flows::create_event(&self.db_connections, session, new_event)
                .unwrap()
                .id
                .into()
        }
    }
}
