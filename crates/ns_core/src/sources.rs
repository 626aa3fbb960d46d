use async_trait::async_trait;
use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Returns the name of the news provider
    fn name(&self) -> &str;

    /// Fetch the top articles for a company, in provider order
    async fn fetch(&self, company_name: &str) -> Result<Vec<Article>>;
}
