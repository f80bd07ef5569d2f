//! Row builders shared by the query module tests.

use super::*;

pub async fn university(pool: &DbPool, id: &str, name: &str, country: &str) -> University {
    create_university(
        pool,
        CreateUniversity {
            id: id.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            country: country.to_string(),
            city: None,
            description: None,
            logo_url: None,
            website: None,
            ranking: None,
            is_featured: false,
        },
    )
    .await
    .unwrap()
}

pub async fn course(pool: &DbPool, id: &str, name: &str, university_id: &str, level: &str) -> Course {
    create_course(
        pool,
        CreateCourse {
            id: id.to_string(),
            name: name.to_string(),
            university_id: university_id.to_string(),
            campus_id: None,
            level: level.to_string(),
            subject: None,
            duration: None,
            tuition_fee: None,
            currency: None,
            intake: None,
            description: None,
        },
    )
    .await
    .unwrap()
}
