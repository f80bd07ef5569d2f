//! Site-wide search across the catalog.

use serde::Serialize;
use tracing::debug;

use crate::db::{self, Course, CourseFilter, DbPool, Scholarship, ScholarshipFilter, University, UniversityFilter};
use crate::models::Page;
use crate::Result;

/// Search hits grouped by kind.
#[derive(Debug, Clone, Serialize, Default)]
pub struct SearchResults {
    pub query: String,
    pub universities: Vec<University>,
    pub courses: Vec<Course>,
    pub scholarships: Vec<Scholarship>,
}

impl SearchResults {
    pub fn total(&self) -> usize {
        self.universities.len() + self.courses.len() + self.scholarships.len()
    }
}

#[derive(Clone)]
pub struct SearchService {
    db: DbPool,
    per_kind: u32,
}

impl SearchService {
    pub fn new(db: DbPool, per_kind: u32) -> Self {
        Self {
            db,
            per_kind: per_kind.max(1),
        }
    }

    /// Match `query` against universities, courses and scholarships.
    ///
    /// A blank query returns empty groups without touching the database.
    pub async fn search(&self, query: &str) -> Result<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResults::default());
        }

        let page = Page {
            page: 1,
            limit: self.per_kind,
        };
        let term = Some(query.to_string());

        let universities = db::list_universities(
            &self.db,
            &UniversityFilter {
                search: term.clone(),
                ..Default::default()
            },
            page,
        )
        .await?;
        let courses = db::list_courses(
            &self.db,
            &CourseFilter {
                search: term.clone(),
                ..Default::default()
            },
            page,
        )
        .await?;
        let scholarships = db::list_scholarships(
            &self.db,
            &ScholarshipFilter {
                search: term,
                ..Default::default()
            },
            page,
        )
        .await?;

        let results = SearchResults {
            query: query.to_string(),
            universities: universities.data,
            courses: courses.data,
            scholarships: scholarships.data,
        };
        debug!(query, hits = results.total(), "Catalog search");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{fixtures, init_in_memory};

    #[tokio::test]
    async fn test_blank_query_is_empty() {
        let pool = init_in_memory().await.unwrap();
        let results = SearchService::new(pool, 5).search("   ").await.unwrap();
        assert_eq!(results.total(), 0);
        assert!(results.query.is_empty());
    }

    #[tokio::test]
    async fn test_search_groups_hits_and_caps_them() {
        let pool = init_in_memory().await.unwrap();
        fixtures::university(&pool, "u-1", "Leeds Beckett", "United Kingdom").await;
        fixtures::university(&pool, "u-2", "Leeds Trinity", "United Kingdom").await;
        fixtures::course(&pool, "c-1", "Nursing", "u-1", "undergraduate").await;

        let service = SearchService::new(pool, 1);
        let results = service.search("leeds").await.unwrap();
        assert_eq!(results.universities.len(), 1);
        assert_eq!(results.courses.len(), 1);
        assert!(results.scholarships.is_empty());
    }
}
