//! Video Service

use std::sync::Arc;

use kernel::pagination::{Page, PageRequest};

use crate::domain::entity::video::{Video, VideoDraft, VideoFilter, VideoPatch};
use crate::domain::repository::VideoRepository;
use crate::domain::value_object::VideoId;
use crate::error::{CmsError, CmsResult};

const NOT_FOUND: &str = "Video not found";

pub struct VideoService<R>
where
    R: VideoRepository,
{
    repo: Arc<R>,
}

impl<R> VideoService<R>
where
    R: VideoRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, filter: VideoFilter, page: PageRequest) -> CmsResult<Page<Video>> {
        self.repo.list_videos(filter, page).await
    }

    pub async fn get(&self, id: &VideoId) -> CmsResult<Video> {
        self.repo
            .find_video(id)
            .await?
            .ok_or(CmsError::NotFound(NOT_FOUND))
    }

    pub async fn create(&self, draft: VideoDraft) -> CmsResult<Video> {
        let video = Video::create(draft)?;
        self.repo.insert_video(&video).await?;

        tracing::info!(video_id = %video.id, youtube_id = %video.youtube_id, "Video created");
        Ok(video)
    }

    pub async fn update(&self, id: &VideoId, patch: VideoPatch) -> CmsResult<Video> {
        let mut video = self.get(id).await?;
        video.apply(patch)?;

        if !self.repo.update_video(&video).await? {
            return Err(CmsError::NotFound(NOT_FOUND));
        }
        Ok(video)
    }

    pub async fn delete(&self, id: &VideoId) -> CmsResult<()> {
        if !self.repo.delete_video(id).await? {
            return Err(CmsError::NotFound(NOT_FOUND));
        }
        tracing::info!(video_id = %id, "Video deleted");
        Ok(())
    }
}
