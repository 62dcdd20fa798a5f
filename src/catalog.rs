//! Service categories offered on the marketplace.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub slug: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    /// Shown before "See all" expands the grid.
    pub popular: bool,
}

impl Category {
    const fn new(
        slug: &'static str,
        name: &'static str,
        icon: &'static str,
        description: &'static str,
        popular: bool,
    ) -> Self {
        Self {
            slug,
            name,
            icon,
            description,
            popular,
        }
    }
}

pub const CATEGORIES: &[Category] = &[
    Category::new("cleaning", "Cleaning", "🧽", "Home and office cleaning, deep cleans, move-out", true),
    Category::new("plumbing", "Plumbing", "🔧", "Leaks, drains, water heaters and fixtures", true),
    Category::new("electrical", "Electrical", "💡", "Wiring, lighting, outlets and panels", true),
    Category::new("handyman", "Handyman", "🔨", "Repairs, mounting and furniture assembly", true),
    Category::new("moving", "Moving", "📦", "Packing, loading and local moves", true),
    Category::new("painting", "Painting", "🎨", "Interior and exterior painting", true),
    Category::new("gardening", "Gardening", "🌿", "Lawn care, planting and yard clean-up", false),
    Category::new("pest-control", "Pest control", "🐜", "Inspection and treatment", false),
    Category::new("appliance-repair", "Appliances", "🧺", "Washer, dryer, fridge and oven repair", false),
    Category::new("hvac", "Heating & AC", "🔥", "Installation, servicing and repair", false),
    Category::new("pet-care", "Pet care", "🐾", "Dog walking, grooming and sitting", false),
    Category::new("tutoring", "Tutoring", "📚", "Lessons and homework help", false),
];

/// Categories shown on the dashboard grid.
pub fn visible(show_all: bool) -> impl Iterator<Item = &'static Category> {
    CATEGORIES.iter().filter(move |c| show_all || c.popular)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_slugs_are_unique() {
        let slugs: HashSet<_> = CATEGORIES.iter().map(|c| c.slug).collect();
        assert_eq!(slugs.len(), CATEGORIES.len());
    }

    #[test]
    fn test_popular_subset() {
        let popular = visible(false).count();
        assert!(popular > 0 && popular < CATEGORIES.len());
        assert_eq!(visible(true).count(), CATEGORIES.len());
    }
}
