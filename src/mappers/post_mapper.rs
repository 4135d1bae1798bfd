use crate::dtos::post_dtos::PostDTO;
use crate::models::post::Post;

/// Converts between the stored `Post` and the API-facing `PostDTO`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostMapper;

impl PostMapper {
    pub fn map_to_entity(&self, dto: PostDTO) -> Post {
        Post {
            id: dto.id,
            title: dto.title,
            description: dto.description,
            content: dto.content,
        }
    }

    pub fn map_to_dto(&self, post: Post) -> PostDTO {
        PostDTO {
            id: post.id,
            title: post.title,
            description: post.description,
            content: post.content,
        }
    }
}
