//! Product Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{Code, ProductId, Slug, text};
use crate::error::{CmsError, CmsResult};

pub const NAME_MAX_LENGTH: usize = 200;
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;
pub const LONG_DESCRIPTION_MAX_LENGTH: usize = 50_000;
pub const URL_MAX_LENGTH: usize = 2048;

#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: Slug,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
    pub category: Code,
    pub product_type: Code,
    pub download_url: Option<String>,
    pub featured: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub category: String,
    pub product_type: String,
    pub download_url: Option<String>,
    pub featured: bool,
    pub active: bool,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: None,
            description: None,
            long_description: None,
            price: None,
            image: None,
            category: String::new(),
            product_type: String::new(),
            download_url: None,
            featured: false,
            // New products are on sale unless told otherwise
            active: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub product_type: Option<String>,
    pub download_url: Option<String>,
    pub featured: Option<bool>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub active_only: bool,
    pub featured_only: bool,
    pub category: Option<Code>,
    pub product_type: Option<Code>,
    /// Matches name or description
    pub search: Option<String>,
}

fn check_price(price: f64) -> CmsResult<f64> {
    if !price.is_finite() || price < 0.0 {
        return Err(CmsError::invalid("Price must be a non-negative number"));
    }
    Ok(price)
}

impl Product {
    pub fn create(draft: ProductDraft) -> CmsResult<Self> {
        let name = text::required("Name", &draft.name, NAME_MAX_LENGTH)?;
        let slug = Slug::explicit_or_derived(draft.slug.as_deref(), &name)?;
        let price = check_price(draft.price.ok_or_else(|| CmsError::invalid("Price is required"))?)?;
        let now = Utc::now();

        Ok(Self {
            id: ProductId::new(),
            description: text::optional(
                "Description",
                draft.description.as_deref(),
                DESCRIPTION_MAX_LENGTH,
            )?,
            long_description: text::optional(
                "Long description",
                draft.long_description.as_deref(),
                LONG_DESCRIPTION_MAX_LENGTH,
            )?,
            image: text::optional("Image", draft.image.as_deref(), URL_MAX_LENGTH)?,
            category: Code::new("Category", &draft.category)?,
            product_type: Code::new("Type", &draft.product_type)?,
            download_url: text::optional(
                "Download URL",
                draft.download_url.as_deref(),
                URL_MAX_LENGTH,
            )?,
            featured: draft.featured,
            active: draft.active,
            created_at: now,
            updated_at: now,
            name,
            slug,
            price,
        })
    }

    pub fn apply(&mut self, patch: ProductPatch) -> CmsResult<()> {
        if let Some(name) = patch.name {
            self.name = text::required("Name", &name, NAME_MAX_LENGTH)?;
        }
        if let Some(slug) = patch.slug {
            self.slug = Slug::new(&slug)?;
        }
        if let Some(description) = patch.description {
            self.description =
                text::optional("Description", Some(&description), DESCRIPTION_MAX_LENGTH)?;
        }
        if let Some(long_description) = patch.long_description {
            self.long_description = text::optional(
                "Long description",
                Some(&long_description),
                LONG_DESCRIPTION_MAX_LENGTH,
            )?;
        }
        if let Some(price) = patch.price {
            self.price = check_price(price)?;
        }
        if let Some(image) = patch.image {
            self.image = text::optional("Image", Some(&image), URL_MAX_LENGTH)?;
        }
        if let Some(category) = patch.category {
            self.category = Code::new("Category", &category)?;
        }
        if let Some(product_type) = patch.product_type {
            self.product_type = Code::new("Type", &product_type)?;
        }
        if let Some(download_url) = patch.download_url {
            self.download_url = text::optional("Download URL", Some(&download_url), URL_MAX_LENGTH)?;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "SEO Masterclass".into(),
            price: Some(49.0),
            category: "course".into(),
            product_type: "digital".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create() {
        let product = Product::create(draft()).unwrap();
        assert_eq!(product.slug.as_str(), "seo-masterclass");
        assert_eq!(product.category.as_str(), "COURSE");
        assert_eq!(product.product_type.as_str(), "DIGITAL");
        assert!(product.active);
        assert!(!product.featured);
    }

    #[test]
    fn test_price_rules() {
        assert!(Product::create(ProductDraft { price: None, ..draft() }).is_err());
        assert!(Product::create(ProductDraft { price: Some(-1.0), ..draft() }).is_err());
        assert!(Product::create(ProductDraft { price: Some(f64::NAN), ..draft() }).is_err());
        assert!(Product::create(ProductDraft { price: Some(0.0), ..draft() }).is_ok());
    }

    #[test]
    fn test_patch() {
        let mut product = Product::create(draft()).unwrap();
        product
            .apply(ProductPatch {
                price: Some(59.5),
                active: Some(false),
                product_type: Some("ebook".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(product.price, 59.5);
        assert!(!product.active);
        assert_eq!(product.product_type.as_str(), "EBOOK");
    }
}
