//! The hard-coded default document. This is the content served when the
//! durable store has never been written (or is unreachable with a cold
//! cache), and the per-section fallback used when a stored payload fails
//! to decode.

use serde_json::Map;

use super::model::{
    Colors, Cta, Feature, Hero, MenuItem, Navbar, NotFound, Popup, QuizQuestion, QuizSection, Seo,
    SiteContent, Stats, Testimonial,
};

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            seo: Seo::default(),
            navbar: Navbar::default(),
            hero: Hero::default(),
            stats: Stats::default(),
            quiz: QuizSection::default(),
            features: default_features(),
            testimonials: default_testimonials(),
            cta: Cta::default(),
            popup: Popup::default(),
            colors: Colors::default(),
            not_found: NotFound::default(),
        }
    }
}

impl Default for Seo {
    fn default() -> Self {
        Self {
            title: "Keto Diet Landing Page - Transform Your Life in 30 Days".into(),
            description: "Failed at Keto Diet? Get our 30-day guaranteed keto meal list and \
                          guides with proven results! 10,000+ people have already transformed \
                          their lives."
                .into(),
            keywords: "keto diet, weight loss, meal planning, keto recipes, healthy eating, \
                       diet plan, nutrition guide"
                .into(),
            author: "KetoMaster".into(),
            canonical: "https://keto-diet-landing-pa-dje0.bolt.host".into(),
            extra: Map::new(),
        }
    }
}

impl Default for Navbar {
    fn default() -> Self {
        Self {
            logo: "KetoMaster".into(),
            menu_items: vec![
                menu_item("Keto Foods", "#keto-foods"),
                menu_item("Shopping List", "#shopping-list"),
                menu_item("Guide", "#guide"),
                menu_item("Contact", "#contact"),
            ],
            extra: Map::new(),
        }
    }
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            title: "Failed at Keto Diet?".into(),
            subtitle: "30-day guaranteed keto meal list and guides with proven results! \
                       10,000+ people have already transformed their lives."
                .into(),
            cta_text: "Get My Free Keto List".into(),
            cta_secondary: "How Does It Work?".into(),
            image: "https://images.pexels.com/photos/1640777/pexels-photo-1640777.jpeg?auto=compress&cs=tinysrgb&w=800".into(),
            extra: Map::new(),
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            users: "10,000+".into(),
            days: "30 Days".into(),
            success: "95%".into(),
            extra: Map::new(),
        }
    }
}

impl Default for QuizSection {
    fn default() -> Self {
        Self {
            title: "Which Keto Foods Are Right for You?".into(),
            subtitle: "Discover your personalized keto plan with a 3-minute test!".into(),
            questions: vec![
                question(
                    "What's your biggest challenge with keto diet?",
                    ["Meal planning", "Shopping lists", "Portion control", "Motivation"],
                ),
                question(
                    "How many meals do you prefer per day?",
                    ["2 meals", "3 meals", "4-5 small meals", "Intermittent fasting"],
                ),
                question(
                    "How much time do you like to spend in the kitchen?",
                    [
                        "Very little (15 min max)",
                        "Moderate (30 min)",
                        "Enough (45 min)",
                        "A lot (1 hour+)",
                    ],
                ),
            ],
            extra: Map::new(),
        }
    }
}

impl Default for Cta {
    fn default() -> Self {
        Self {
            title: "Start Today to Succeed in Keto Diet!".into(),
            subtitle: "10,000+ people have already transformed their lives. Your turn!".into(),
            features: vec![
                "200+ Keto recipes and menus".into(),
                "Weekly shopping lists".into(),
                "WhatsApp support group".into(),
                "Progress tracking tools".into(),
            ],
            button_text: "Get It Free Now".into(),
            guarantee_text: "30-day money back guarantee".into(),
            no_card_text: "No credit card required".into(),
            extra: Map::new(),
        }
    }
}

impl Default for Popup {
    fn default() -> Self {
        Self {
            title: "Leaving already? 🥺".into(),
            subtitle: "Don't miss out on keto success! Last chance: Get your Free Keto guide \
                       and transform your life in 30 days."
                .into(),
            button_text: "Use My Last Chance!".into(),
            dismiss_text: "No thanks, let me leave".into(),
            extra: Map::new(),
        }
    }
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            primary: "#16a34a".into(),
            secondary: "#f97316".into(),
            accent: "#3b82f6".into(),
            success: "#22c55e".into(),
            warning: "#f59e0b".into(),
            error: "#ef4444".into(),
            background: "#ffffff".into(),
            surface: "#f9fafb".into(),
            text: "#111827".into(),
            text_secondary: "#6b7280".into(),
            extra: Map::new(),
        }
    }
}

impl Default for NotFound {
    fn default() -> Self {
        Self {
            title: "Oops! Page Not Found".into(),
            subtitle: "The page you're looking for doesn't exist. Let's get you back to your \
                       keto journey!"
                .into(),
            button_text: "Back to Home".into(),
            extra: Map::new(),
        }
    }
}

fn default_features() -> Vec<Feature> {
    [
        ("200+ Keto Recipes", "Delicious and easy recipes from breakfast to dinner"),
        ("Weekly Menus", "Ready-made menus to live keto without thinking"),
        ("Shopping Lists", "Detailed lists that make your grocery shopping easier"),
        ("Private Support Group", "WhatsApp group where you can get 24/7 support"),
        ("Progress Tracking", "Special tools to track your goals"),
        ("Bonus Content", "Additional guides and special tips"),
    ]
    .into_iter()
    .map(|(title, description)| Feature {
        title: title.into(),
        description: description.into(),
    })
    .collect()
}

fn default_testimonials() -> Vec<Testimonial> {
    [
        (
            "Sarah K.",
            "Lost 26 lbs",
            "I reached my goal in 3 months! Keto lists made shopping and meal planning so easy.",
            "https://images.pexels.com/photos/774909/pexels-photo-774909.jpeg?auto=compress&cs=tinysrgb&w=300",
        ),
        (
            "Mike T.",
            "Lost 18 lbs",
            "I didn't have time to exercise but got amazing results with just nutrition!",
            "https://images.pexels.com/photos/2379005/pexels-photo-2379005.jpeg?auto=compress&cs=tinysrgb&w=300",
        ),
        (
            "Emma M.",
            "Lost 33 lbs",
            "None of the diets I tried for years worked. Keto changed my life!",
            "https://images.pexels.com/photos/1239291/pexels-photo-1239291.jpeg?auto=compress&cs=tinysrgb&w=300",
        ),
    ]
    .into_iter()
    .map(|(name, result, story, image)| Testimonial {
        name: name.into(),
        result: result.into(),
        story: story.into(),
        image: image.into(),
    })
    .collect()
}

fn menu_item(label: &str, href: &str) -> MenuItem {
    MenuItem {
        label: label.into(),
        href: href.into(),
    }
}

fn question<const N: usize>(text: &str, options: [&str; N]) -> QuizQuestion {
    QuizQuestion {
        question: text.into(),
        options: options.iter().map(|o| (*o).into()).collect(),
    }
}
