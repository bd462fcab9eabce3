//! Deterministic template-based artifact generation.
//!
//! Substituted for real generation whenever no credential is configured or a
//! stage's completion/parse fails. Every generator is seeded only by the idea
//! text (via its keyword set) and must return a schema-valid artifact for any
//! input, including an idea that yields zero keywords.

use chrono::Utc;

use crate::wire::{
    AdCopy, BusinessModel, BusinessSpec, Feature, Financials, Hero, LandingPage, MarketingAssets,
    MarketingPlan, Message, MonthlyProjection, PitchDeck, PricingTier, ProductPlan, Role, Slide,
    StartupIdentity, Testimonial,
};

/// Name used when the idea contains no usable keywords at all.
pub const DEFAULT_NAME: &str = "InnovateCo";

const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "that", "this", "is", "are", "was", "were",
];

/// Lowercase, split on whitespace, drop stopwords and words of length <= 3,
/// keep at most the first three in original order.
pub fn extract_keywords(idea: &str) -> Vec<String> {
    idea.to_lowercase()
        .split_whitespace()
        .filter(|w| w.len() > 3 && !STOPWORDS.contains(w))
        .take(3)
        .map(str::to_string)
        .collect()
}

/// Capitalized first keyword + "ly", or the fixed default name.
pub fn startup_name(idea: &str) -> String {
    match extract_keywords(idea).first() {
        Some(kw) => {
            let mut chars = kw.chars();
            match chars.next() {
                Some(c) => format!("{}{}ly", c.to_uppercase(), chars.as_str()),
                None => DEFAULT_NAME.to_string(),
            }
        }
        None => DEFAULT_NAME.to_string(),
    }
}

fn keyword_or<'a>(keywords: &'a [String], idx: usize, default: &'a str) -> &'a str {
    keywords.get(idx).map(String::as_str).unwrap_or(default)
}

pub fn conversation(idea: &str) -> Vec<Message> {
    let name = startup_name(idea);
    let base = Utc::now().timestamp_millis();

    let lines = [
        (Role::Ceo, format!(
            "Excellent concept! \"{idea}\" addresses a genuine market gap. For {name}, we need to establish clear competitive advantages and focus on sustainable growth strategies."
        )),
        (Role::Designer, format!(
            "From a UX perspective for {name}, I envision a clean, intuitive interface. We should prioritize mobile-first design and ensure accessibility is built in from day one."
        )),
        (Role::Engineer, format!(
            "The technical implementation for \"{idea}\" is definitely feasible. I recommend a modern stack - Next.js frontend, Node.js backend, PostgreSQL database. We can have an MVP ready in 8-12 weeks."
        )),
        (Role::Marketer, format!(
            "{name} has strong market potential. Our go-to-market strategy should leverage content marketing, SEO, and strategic partnerships. Social media and community building will be crucial for early traction."
        )),
        (Role::Cfo, format!(
            "Based on preliminary analysis for {name}, we're looking at approximately $120-150K in startup costs with a monthly burn rate around $20-25K. I project we can reach breakeven within 12-15 months with proper execution."
        )),
    ];

    lines
        .into_iter()
        .enumerate()
        .map(|(i, (role, content))| Message {
            role,
            content,
            timestamp: base + (i as i64) * 1500,
        })
        .collect()
}

pub fn business_spec(idea: &str) -> BusinessSpec {
    let name = startup_name(idea);
    let keywords = extract_keywords(idea);
    let first = keyword_or(&keywords, 0, "Innovation");

    BusinessSpec {
        startup: StartupIdentity {
            name: name.clone(),
            tagline: format!("{first} made simple"),
            problem: format!(
                "Users currently lack an efficient solution for {}",
                if keywords.is_empty() { "their daily workflow".to_string() } else { keywords.join(", ") }
            ),
            solution: idea.to_string(),
            target_audience: "Early adopters and tech-savvy professionals aged 25-45".to_string(),
        },
        product: ProductPlan {
            features: vec![
                format!("Core {} engine", keyword_or(&keywords, 0, "functionality")),
                "Intuitive user interface".to_string(),
                "Real-time synchronization".to_string(),
                "Analytics and insights dashboard".to_string(),
                "Mobile and web applications".to_string(),
            ],
            tech_stack: ["Next.js", "TypeScript", "Node.js", "PostgreSQL", "AWS", "Redis"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            mvp_timeline: "10-12 weeks".to_string(),
        },
        business: BusinessModel {
            revenue_model: "Freemium with premium subscription tiers".to_string(),
            pricing: "Free tier, $19/month Pro, $79/month Enterprise".to_string(),
            competitors: vec![
                "Traditional solutions".to_string(),
                "Legacy platforms".to_string(),
                "Manual processes".to_string(),
            ],
        },
        marketing: MarketingPlan {
            channels: vec![
                "Content Marketing".to_string(),
                "SEO".to_string(),
                "Social Media".to_string(),
                "Product Hunt".to_string(),
                "Partnerships".to_string(),
            ],
            messaging: format!(
                "{name} - {} your workflow with intelligent automation",
                keyword_or(&keywords, 0, "Transform")
            ),
            launch_strategy:
                "Beta launch with early adopters, followed by Product Hunt and press outreach"
                    .to_string(),
        },
        financials: Financials {
            startup_costs: 130_000,
            monthly_burn: 22_000,
            revenue_projections: (0..12)
                .map(|i| MonthlyProjection {
                    month: i + 1,
                    revenue: (i as u64) * (i as u64) * 1200 + (i as u64) * 3000,
                    costs: 22_000,
                })
                .collect(),
        },
    }
}

pub fn landing_page(idea: &str) -> LandingPage {
    let name = startup_name(idea);
    let keywords = extract_keywords(idea);

    LandingPage {
        hero: Hero {
            headline: format!(
                "Transform Your {} with {name}",
                keyword_or(&keywords, 0, "Business")
            ),
            subheadline: idea.to_string(),
            cta: "Start Free Trial".to_string(),
        },
        features: vec![
            Feature {
                title: "Smart Automation".to_string(),
                description: format!(
                    "Automate your {} with intelligent AI-powered features",
                    keyword_or(&keywords, 0, "workflow")
                ),
                icon: "Zap".to_string(),
            },
            Feature {
                title: "Real-Time Insights".to_string(),
                description: "Get instant analytics and actionable insights to make better decisions"
                    .to_string(),
                icon: "TrendingUp".to_string(),
            },
            Feature {
                title: "Seamless Integration".to_string(),
                description: "Connect with your existing tools and workflows effortlessly"
                    .to_string(),
                icon: "Link".to_string(),
            },
        ],
        testimonials: vec![
            Testimonial {
                quote: format!(
                    "{name} completely transformed how we handle {}. Highly recommended!",
                    keyword_or(&keywords, 0, "our operations")
                ),
                author: "Alex Johnson".to_string(),
                role: "CEO, TechCorp".to_string(),
            },
            Testimonial {
                quote: "The ROI was immediate. We saved 15 hours per week within the first month."
                    .to_string(),
                author: "Sarah Chen".to_string(),
                role: "Operations Manager".to_string(),
            },
        ],
        pricing: vec![
            PricingTier {
                tier: "Free".to_string(),
                price: "$0/month".to_string(),
                features: vec![
                    "Basic features".to_string(),
                    "Up to 100 items".to_string(),
                    "Email support".to_string(),
                    "Community access".to_string(),
                ],
            },
            PricingTier {
                tier: "Pro".to_string(),
                price: "$19/month".to_string(),
                features: vec![
                    "All Free features".to_string(),
                    "Unlimited items".to_string(),
                    "Priority support".to_string(),
                    "Advanced analytics".to_string(),
                    "API access".to_string(),
                ],
            },
            PricingTier {
                tier: "Enterprise".to_string(),
                price: "$79/month".to_string(),
                features: vec![
                    "All Pro features".to_string(),
                    "Custom integrations".to_string(),
                    "Dedicated support".to_string(),
                    "SLA guarantee".to_string(),
                    "White-label options".to_string(),
                ],
            },
        ],
    }
}

pub fn pitch_deck(idea: &str) -> PitchDeck {
    let name = startup_name(idea);
    let keywords = extract_keywords(idea);
    let first = |d: &'static str| keyword_or(&keywords, 0, d).to_string();

    let slides = vec![
        Slide {
            title: name.clone(),
            content: format!(
                "# {name}\n\n{idea}\n\n*Revolutionizing {}*",
                first("the industry")
            ),
            kind: "title".to_string(),
        },
        Slide {
            title: "The Problem".to_string(),
            content: format!(
                "## Current challenges in {}\n\n- Existing solutions are outdated and inefficient\n- Manual processes waste time and resources\n- Lack of integration causes data silos\n- High costs prevent widespread adoption\n\n**There must be a better way**",
                first("the market")
            ),
            kind: "problem".to_string(),
        },
        Slide {
            title: "Our Solution".to_string(),
            content: format!(
                "## {name}: {idea}\n\n- Automated {} management\n- Intelligent AI-powered insights\n- Seamless integrations with existing tools\n- Affordable pricing for all business sizes\n- Real-time collaboration features",
                first("workflow")
            ),
            kind: "solution".to_string(),
        },
        Slide {
            title: "Market Opportunity".to_string(),
            content: format!(
                "## Multi-Billion Dollar Market\n\n- Growing demand for {} solutions\n- 500M+ potential users worldwide\n- Market growing at 25% CAGR\n- Shift to digital-first operations\n- Increasing enterprise adoption",
                first("automation")
            ),
            kind: "market".to_string(),
        },
        Slide {
            title: "Business Model".to_string(),
            content: "## Freemium + Enterprise\n\n- Free tier for user acquisition\n- $19/month Pro subscription\n- $79/month Enterprise plan\n- Target: 50K users by Year 1\n- $5M ARR by Year 2"
                .to_string(),
            kind: "business".to_string(),
        },
        Slide {
            title: "Traction".to_string(),
            content: "## Early Validation\n\n- MVP launched and tested\n- 500+ beta waitlist signups\n- Positive user feedback (4.8/5 rating)\n- 3 pilot customers confirmed\n- Strong engagement metrics"
                .to_string(),
            kind: "traction".to_string(),
        },
        Slide {
            title: "Competition".to_string(),
            content: "## Competitive Advantage\n\n**Our Edge:**\n- Modern, intuitive interface\n- AI-powered automation\n- Better pricing (50% cheaper)\n- Faster implementation\n- Superior customer support"
                .to_string(),
            kind: "competition".to_string(),
        },
        Slide {
            title: "Go-to-Market".to_string(),
            content: "## Launch Strategy\n\n**Phase 1:** Beta launch (Month 1-2)\n**Phase 2:** Product Hunt launch (Month 3)\n**Phase 3:** Content marketing & SEO (Ongoing)\n**Phase 4:** Enterprise sales (Month 6+)\n\nChannels: Digital ads, partnerships, community"
                .to_string(),
            kind: "marketing".to_string(),
        },
        Slide {
            title: "Team".to_string(),
            content: format!(
                "## Experienced Founders\n\n- **CEO:** 10 years in {}\n- **CTO:** Former engineering lead at major tech company\n- **CPO:** Product expert with 3 successful exits\n- **Advisors:** Industry veterans from leading companies",
                first("tech")
            ),
            kind: "team".to_string(),
        },
        Slide {
            title: "The Ask".to_string(),
            content: "## Raising $500K Seed Round\n\n**Use of Funds:**\n- Product development: 50%\n- Marketing & sales: 30%\n- Operations & hiring: 20%\n\n**Milestones:**\n- Launch public beta (Month 3)\n- Reach 10K users (Month 6)\n- $500K ARR (Month 12)"
                .to_string(),
            kind: "ask".to_string(),
        },
    ];

    PitchDeck { slides }
}

pub fn marketing_assets(idea: &str) -> MarketingAssets {
    let name = startup_name(idea);
    let keywords = extract_keywords(idea);
    let first = |d: &'static str| keyword_or(&keywords, 0, d).to_string();

    MarketingAssets {
        tweets: vec![
            format!(
                "🚀 Excited to announce {name}! We're transforming {} with intelligent automation.\n\n{idea}\n\nJoin our beta → [link]\n\n#startup #{} #AI",
                first("the industry"),
                first("innovation")
            ),
            format!(
                "Tired of manual {}? 😅\n\n{name} automates everything:\n✅ Save 15+ hours/week\n✅ Real-time insights\n✅ Seamless integrations\n✅ Free to start\n\nTry it now → [link]",
                first("processes")
            ),
            format!(
                "The future of {} is here.\n\n{name} uses AI to:\n→ Automate repetitive tasks\n→ Provide actionable insights\n→ Integrate with your tools\n\nJoin 1000+ early adopters → [link]\n\n#productivity #automation",
                first("work")
            ),
        ],
        linkedin_post: format!(
            "🎯 Introducing {name}\n\nAfter months of development, we're thrilled to launch {name} - {idea}\n\n💡 The Problem:\nBusinesses waste countless hours on manual {}, leading to inefficiency and missed opportunities.\n\n🚀 Our Solution:\n{name} combines intelligent automation with powerful analytics to transform how teams work.\n\n📊 Key Features:\n→ AI-powered workflow automation\n→ Real-time analytics dashboard\n→ Seamless tool integrations\n→ Enterprise-grade security\n\n🎁 Special Offer:\nWe're offering free access to our beta program for the first 100 signups.\n\n👉 Learn more: [link]\n\n#Innovation #Automation #Startup #{}",
            first("processes"),
            first("Technology")
        ),
        email_sequence: vec![
            format!(
                "Subject: Welcome to {name}! 🚀\n\nHi there!\n\nWelcome to {name} - we're excited to have you on board!\n\n{idea}\n\nHere's what you can do right now:\n1. Complete your profile setup (2 minutes)\n2. Connect your first integration\n3. Explore our automation templates\n\nNeed help? Our team is here for you.\n\nBest regards,\nThe {name} Team\n\nP.S. Check out our quick start guide → [link]"
            ),
            format!(
                "Subject: Getting the most out of {name}\n\nHey!\n\nHope you're enjoying {name} so far. We wanted to share some tips to help you maximize your results:\n\n💡 Pro Tip #1: Set up automation rules to save time\n💡 Pro Tip #2: Use our analytics to track key metrics\n💡 Pro Tip #3: Integrate with your existing tools\n\nReady to upgrade? Pro users get:\n→ Unlimited automations\n→ Advanced analytics\n→ Priority support\n→ API access\n\nUpgrade now → [link]"
            ),
            format!(
                "Subject: You're making great progress!\n\nHi,\n\nWe've noticed you've been actively using {name} - that's awesome!\n\nYour stats so far:\n✓ 15 hours saved\n✓ 50+ tasks automated\n✓ 3 integrations connected\n\nWant to take it to the next level? Our Pro plan unlocks:\n→ Unlimited everything\n→ Advanced features\n→ Dedicated support\n\nClaim your 30% launch discount → [link]\n\nThanks for being an early adopter!\n\nBest,\nThe {name} Team"
            ),
        ],
        ad_copy: vec![
            AdCopy {
                platform: "Google Ads".to_string(),
                headline: format!("{name} - Automate Your {}", first("Workflow")),
                body: format!(
                    "Save 15+ hours per week with intelligent automation. Free trial, no credit card required. Join 1000+ teams already using {name}."
                ),
            },
            AdCopy {
                platform: "Facebook Ads".to_string(),
                headline: format!("Stop Wasting Time on Manual {}", first("Tasks")),
                body: format!(
                    "{name} automates your workflow so you can focus on what matters. AI-powered, easy to use, affordable pricing. Start free today!"
                ),
            },
            AdCopy {
                platform: "LinkedIn Ads".to_string(),
                headline: format!("Enterprise {} Platform", first("Automation")),
                body: format!(
                    "Trusted by leading companies. {name} delivers ROI in weeks, not months. Schedule a demo to see how we can transform your operations."
                ),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDEA: &str = "A meal planning app for busy families";

    #[test]
    fn keywords_drop_stopwords_and_short_words() {
        let kws = extract_keywords(IDEA);
        assert_eq!(kws, vec!["meal", "planning", "busy"]);
    }

    #[test]
    fn startup_name_capitalizes_first_keyword() {
        assert_eq!(startup_name(IDEA), "Mealy");
    }

    #[test]
    fn stopword_only_idea_gets_default_name() {
        assert!(extract_keywords("a to of the").is_empty());
        assert_eq!(startup_name("a to of the"), DEFAULT_NAME);
        let spec = business_spec("a to of the");
        assert_eq!(spec.startup.name, DEFAULT_NAME);
        assert!(!spec.startup.tagline.is_empty());
    }

    #[test]
    fn conversation_has_five_ordered_messages() {
        let msgs = conversation(IDEA);
        assert_eq!(msgs.len(), 5);
        assert_eq!(msgs[0].role, Role::Ceo);
        assert_eq!(msgs[4].role, Role::Cfo);
        for pair in msgs.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, 1500);
        }
    }

    #[test]
    fn business_spec_projects_exactly_twelve_months() {
        let spec = business_spec(IDEA);
        let months: Vec<u32> = spec
            .financials
            .revenue_projections
            .iter()
            .map(|p| p.month)
            .collect();
        assert_eq!(months, (1..=12).collect::<Vec<_>>());
        assert!(!spec.product.features.is_empty());
        assert!(!spec.business.competitors.is_empty());
        assert!(!spec.marketing.channels.is_empty());
    }

    #[test]
    fn landing_page_is_shape_valid() {
        let page = landing_page(IDEA);
        assert!(!page.hero.headline.is_empty());
        assert_eq!(page.features.len(), 3);
        assert!(!page.testimonials.is_empty());
        assert!((1..=3).contains(&page.pricing.len()));
    }

    #[test]
    fn pitch_deck_has_ten_canonical_slides() {
        let deck = pitch_deck(IDEA);
        assert_eq!(deck.slides.len(), 10);
        assert_eq!(deck.slides[0].kind, "title");
        assert_eq!(deck.slides[9].kind, "ask");
        assert!(deck.slides.iter().all(|s| !s.content.is_empty()));
    }

    #[test]
    fn marketing_assets_are_shape_valid() {
        let assets = marketing_assets(IDEA);
        assert_eq!(assets.tweets.len(), 3);
        assert!(!assets.linkedin_post.is_empty());
        assert_eq!(assets.email_sequence.len(), 3);
        assert_eq!(assets.ad_copy.len(), 3);
    }

    #[test]
    fn textual_content_is_stable_across_invocations() {
        let a = business_spec(IDEA);
        let b = business_spec(IDEA);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
        let deck_a = serde_json::to_string(&pitch_deck(IDEA)).unwrap();
        let deck_b = serde_json::to_string(&pitch_deck(IDEA)).unwrap();
        assert_eq!(deck_a, deck_b);
    }
}
