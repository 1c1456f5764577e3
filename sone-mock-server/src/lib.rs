use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet, HashMap},
    rc::Rc,
};

use anyhow::anyhow;
use async_trait::async_trait;
use sone_client::{
    api::{
        DeleteResponse, Error, FormPassword, LikesResponse, PostId, ReplyId, Request, SoneId,
        SoneStatus, Status, Target,
    },
    Backend,
};

/// In-memory web interface, answering like the real one does
pub struct MockServer {
    form_password: FormPassword,
    current_sone: Option<SoneId>,
    translations: HashMap<String, String>,
    sones: BTreeMap<SoneId, SoneStatus>,
    posts: BTreeMap<PostId, Likeable>,
    replies: BTreeMap<ReplyId, Likeable>,
    refusal: Option<DeleteResponse>,
    calls: Vec<Request>,
}

#[derive(Debug)]
struct Likeable {
    author: SoneId,
    likers: BTreeSet<SoneId>,
}

impl MockServer {
    pub fn new(form_password: &str) -> MockServer {
        MockServer {
            form_password: FormPassword(String::from(form_password)),
            current_sone: None,
            translations: HashMap::new(),
            sones: BTreeMap::new(),
            posts: BTreeMap::new(),
            replies: BTreeMap::new(),
            refusal: None,
            calls: Vec::new(),
        }
    }

    /// Act as if `sone` was logged in, or nobody if `None`
    pub fn login(&mut self, sone: Option<SoneId>) {
        self.current_sone = sone;
    }

    /// Answer every authenticated delete with `success: false` and the
    /// given error code, if any
    pub fn refuse_deletes(&mut self, code: Option<&str>) {
        self.refusal = Some(DeleteResponse {
            success: false,
            error: code.map(String::from),
        });
    }

    pub fn add_translation(&mut self, key: &str, value: &str) {
        self.translations
            .insert(String::from(key), String::from(value));
    }

    /// Add or update a sone
    pub fn set_sone(&mut self, sone: SoneId, status: Status, modified: bool) {
        let name = format!("Sone {}", sone.0);
        let last_updated = format!("update #{}", self.calls.len());
        self.sones.insert(
            sone,
            SoneStatus {
                name,
                status,
                modified,
                last_updated,
            },
        );
    }

    /// Fetching the status of a removed sone fails
    pub fn remove_sone(&mut self, sone: &SoneId) {
        self.sones.remove(sone);
    }

    pub fn add_post(&mut self, post: PostId, author: SoneId) {
        self.posts.insert(
            post,
            Likeable {
                author,
                likers: BTreeSet::new(),
            },
        );
    }

    pub fn add_reply(&mut self, reply: ReplyId, author: SoneId) {
        self.replies.insert(
            reply,
            Likeable {
                author,
                likers: BTreeSet::new(),
            },
        );
    }

    /// Make `sone` like `target` without going through the endpoint
    pub fn add_liker(&mut self, target: &Target, sone: SoneId) {
        if let Some(l) = self.likeable_mut(target) {
            l.likers.insert(sone);
        }
    }

    pub fn exists(&self, target: &Target) -> bool {
        self.likeable(target).is_some()
    }

    pub fn num_likes(&self, target: &Target) -> Option<usize> {
        self.likeable(target).map(|l| l.likers.len())
    }

    /// Every request received so far, in order
    pub fn calls(&self) -> &[Request] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn likeable(&self, target: &Target) -> Option<&Likeable> {
        match target {
            Target::Post(p) => self.posts.get(p),
            Target::Reply(r) => self.replies.get(r),
        }
    }

    fn likeable_mut(&mut self, target: &Target) -> Option<&mut Likeable> {
        match target {
            Target::Post(p) => self.posts.get_mut(p),
            Target::Reply(r) => self.replies.get_mut(r),
        }
    }

    fn check_form_password(&self, form_password: &FormPassword) -> anyhow::Result<()> {
        match *form_password == self.form_password {
            true => Ok(()),
            false => Err(anyhow!("403 Forbidden: invalid form password")),
        }
    }

    pub fn get_translation(&mut self, key: &str) -> String {
        self.calls.push(Request::GetTranslation {
            key: String::from(key),
        });
        self.translations
            .get(key)
            .cloned()
            .unwrap_or_else(|| String::from(key))
    }

    pub fn get_sone_status(&mut self, sone: &SoneId) -> anyhow::Result<SoneStatus> {
        self.calls
            .push(Request::GetSoneStatus { sone: sone.clone() });
        self.sones
            .get(sone)
            .cloned()
            .ok_or_else(|| anyhow!("500 Internal Server Error: no sone {sone}"))
    }

    pub fn delete(
        &mut self,
        target: &Target,
        form_password: &FormPassword,
    ) -> anyhow::Result<DeleteResponse> {
        self.calls.push(Request::Delete {
            target: target.clone(),
            form_password: form_password.clone(),
        });
        self.check_form_password(form_password)?;
        if let Some(refusal) = &self.refusal {
            return Ok(refusal.clone());
        }
        let author = match self.likeable(target) {
            Some(l) => l.author.clone(),
            None => {
                let err = match target {
                    Target::Post(_) => Error::InvalidPostId,
                    Target::Reply(_) => Error::InvalidReplyId,
                };
                return Ok(DeleteResponse::failure(&err));
            }
        };
        let current = match &self.current_sone {
            Some(s) => s,
            None => return Ok(DeleteResponse::failure(&Error::AuthRequired)),
        };
        if *current != author {
            return Ok(DeleteResponse::failure(&Error::NotAuthorized(target.kind())));
        }
        match target {
            Target::Post(p) => self.posts.remove(p),
            Target::Reply(r) => self.replies.remove(r),
        };
        tracing::debug!(%target, "mock server deleted");
        Ok(DeleteResponse::success())
    }

    fn set_liked(
        &mut self,
        target: &Target,
        form_password: &FormPassword,
        liked: bool,
    ) -> anyhow::Result<()> {
        let req = match liked {
            true => Request::Like {
                target: target.clone(),
                form_password: form_password.clone(),
            },
            false => Request::Unlike {
                target: target.clone(),
                form_password: form_password.clone(),
            },
        };
        self.calls.push(req);
        self.check_form_password(form_password)?;
        let current = self
            .current_sone
            .clone()
            .ok_or_else(|| anyhow!("403 Forbidden: not logged in"))?;
        // Unknown targets are silently ignored, like the web interface does
        if let Some(l) = self.likeable_mut(target) {
            match liked {
                true => l.likers.insert(current),
                false => l.likers.remove(&current),
            };
        }
        Ok(())
    }

    pub fn like(&mut self, target: &Target, form_password: &FormPassword) -> anyhow::Result<()> {
        self.set_liked(target, form_password, true)
    }

    pub fn unlike(&mut self, target: &Target, form_password: &FormPassword) -> anyhow::Result<()> {
        self.set_liked(target, form_password, false)
    }

    pub fn get_likes(&mut self, target: &Target) -> LikesResponse {
        self.calls.push(Request::GetLikes {
            target: target.clone(),
        });
        match self.num_likes(target) {
            Some(n) => LikesResponse {
                success: true,
                likes: n as u64,
            },
            None => LikesResponse::default(),
        }
    }
}

/// `Backend` handle onto a shared `MockServer`
#[derive(Clone)]
pub struct MockBackend(pub Rc<RefCell<MockServer>>);

impl MockBackend {
    pub fn new(server: MockServer) -> MockBackend {
        MockBackend(Rc::new(RefCell::new(server)))
    }

    pub fn server(&self) -> std::cell::RefMut<'_, MockServer> {
        self.0.borrow_mut()
    }
}

#[async_trait(?Send)]
impl Backend for MockBackend {
    async fn get_translation(&self, key: &str) -> anyhow::Result<String> {
        Ok(self.server().get_translation(key))
    }

    async fn get_sone_status(&self, sone: &SoneId) -> anyhow::Result<SoneStatus> {
        self.server().get_sone_status(sone)
    }

    async fn delete(
        &self,
        target: &Target,
        form_password: &FormPassword,
    ) -> anyhow::Result<DeleteResponse> {
        self.server().delete(target, form_password)
    }

    async fn like(&self, target: &Target, form_password: &FormPassword) -> anyhow::Result<()> {
        self.server().like(target, form_password)
    }

    async fn unlike(&self, target: &Target, form_password: &FormPassword) -> anyhow::Result<()> {
        self.server().unlike(target, form_password)
    }

    async fn get_likes(&self, target: &Target) -> anyhow::Result<LikesResponse> {
        Ok(self.server().get_likes(target))
    }
}
