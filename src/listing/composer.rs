use crate::format::{format_number, group_thousands};
use crate::models::PropertyAttributes;
use rand::Rng;

/// Narrative templates a description can be rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Welcome,
    Discover,
    Luxury,
}

impl Template {
    pub const ALL: [Template; 3] = [Template::Welcome, Template::Discover, Template::Luxury];

    /// Interpolate the attributes into this template
    pub fn render(&self, attrs: &PropertyAttributes) -> String {
        let bedrooms = attrs.bedrooms;
        let bathrooms = format_number(attrs.bathrooms);
        let property_type = attrs.property_type.to_lowercase();
        let location = &attrs.location;
        let area = group_thousands(attrs.sqft);
        let features = match feature_clause(&attrs.features) {
            Some(clause) => format!(" featuring {}", clause),
            None => String::new(),
        };

        match self {
            Template::Welcome => format!(
                "Welcome to this stunning {bedrooms}-bedroom, {bathrooms}-bathroom {property_type} \
                 in the heart of {location}. Spanning {area} square feet{features}, \
                 this property offers the perfect blend of comfort and style."
            ),
            Template::Discover => format!(
                "Discover exceptional living in this beautiful {bedrooms}-bedroom {property_type} \
                 located in desirable {location}. With {bathrooms} bathrooms and {area} sq ft \
                 of thoughtfully designed space{features}, this home is ready to impress."
            ),
            Template::Luxury => format!(
                "Step into luxury with this magnificent {bedrooms}-bedroom, {bathrooms}-bathroom \
                 {property_type} in {location}. Boasting {area} square feet of living space{features}, \
                 this property represents the finest in Canadian real estate."
            ),
        }
    }
}

/// Join features as "A, B and C". Returns `None` for an empty list.
pub fn feature_clause(features: &[String]) -> Option<String> {
    match features {
        [] => None,
        [only] => Some(only.clone()),
        [head @ .., last] => Some(format!("{} and {}", head.join(", "), last)),
    }
}

/// Compose a description using the thread-local random source
pub fn compose(attrs: &PropertyAttributes) -> String {
    compose_with(attrs, &mut rand::thread_rng())
}

/// Compose a description, picking the template uniformly from `rng`.
///
/// Callers validate that property type and location are present first.
pub fn compose_with<R: Rng + ?Sized>(attrs: &PropertyAttributes, rng: &mut R) -> String {
    let template = Template::ALL[rng.gen_range(0..Template::ALL.len())];
    template.render(attrs)
}
