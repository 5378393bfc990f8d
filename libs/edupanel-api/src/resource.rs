use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

use edupanel_shared::models::{
    About, Banner, Contact, Course, CoursePermission, Faq, Id, Lesson, Module, Notification, Order, PromoCode,
    Source, Subject, Tariff, Teacher, User,
};
use edupanel_shared::{ListQuery, Page};

use tracing::warn;

use crate::client::ApiClient;
use crate::error::Result;

/// Upper bound on pages fetched by [`ResourceService::list_all`].
const MAX_PAGES: u32 = 1000;

/// An entity managed through the standard REST shape under `PATH`.
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    const PATH: &'static str;

    fn id(&self) -> Id;
}

macro_rules! resource {
    ($($ty:ty => $path:literal),* $(,)?) => {
        $(
            impl Resource for $ty {
                const PATH: &'static str = $path;

                fn id(&self) -> Id {
                    self.id
                }
            }
        )*
    };
}

resource! {
    Subject => "subject",
    Course => "course",
    Module => "module",
    Lesson => "lesson",
    Source => "source",
    Tariff => "tariff",
    Teacher => "teacher",
    User => "user",
    PromoCode => "promocode",
    Order => "order",
    Banner => "banner",
    Notification => "notification",
    Faq => "faq",
    About => "about",
    Contact => "contact",
    CoursePermission => "course-permission",
}

/// List/get/create/update/delete for one resource kind.
#[derive(Clone, Debug)]
pub struct ResourceService<R> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceService<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<R>> {
        self.api.get(R::PATH, &query.pairs()).await
    }

    pub async fn get(&self, id: Id) -> Result<R> {
        self.api.get(&format!("{}/{}", R::PATH, id), &[]).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<R> {
        self.api.post(R::PATH, body).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: Id, body: &B) -> Result<R> {
        self.api.put(&format!("{}/{}/update", R::PATH, id), body).await
    }

    pub async fn delete(&self, id: Id) -> Result<()> {
        self.api.delete(&format!("{}/{}/delete", R::PATH, id)).await
    }

    /// Walks every page of `query` (starting at page 1) and concatenates the rows.
    ///
    /// Stops at the reported `total_page` when there is one, otherwise when
    /// `has_next` turns false, and never reads more than `MAX_PAGES` pages.
    pub async fn list_all(&self, query: &ListQuery) -> Result<Vec<R>> {
        let mut query = query.clone();
        query.page = 1;
        let mut rows = Vec::new();
        loop {
            let page = self.list(&query).await?;
            let last = if page.total_page > 0 {
                query.page >= page.total_page
            } else {
                !page.has_next
            };
            let empty = page.data.is_empty();
            rows.extend(page.data);
            if last || empty {
                break;
            }
            if query.page >= MAX_PAGES {
                warn!("Stopped listing {} after {} pages", R::PATH, MAX_PAGES);
                break;
            }
            query.page += 1;
        }
        Ok(rows)
    }
}
