//! Built-in portfolio content. Replace by dropping a `portfolio.toml` into the
//! workspace or `.folio/`.

use crate::PortfolioData;
use folio_core::{
    Achievement, Education, Experience, Link, LinkType, Profile, Project, SkillCategory, SkillItem,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn skill(name: &str, level: u8) -> SkillItem {
    SkillItem {
        name: name.to_string(),
        level: Some(level),
        notes: None,
    }
}

pub(crate) fn content() -> PortfolioData {
    PortfolioData {
        profile: Profile {
            name: "Afroz Sheikh".to_string(),
            title: "Full-Stack Developer".to_string(),
            location: "Mumbai, India".to_string(),
            short_bio: "A passionate full-stack developer with a knack for building robust and \
                        scalable web applications."
                .to_string(),
            long_bio: "As a full-stack developer, I specialize in creating dynamic, \
                       high-performance web applications from concept to deployment. With strong \
                       expertise in the MERN stack and modern technologies like Next.js and \
                       TypeScript, I am dedicated to writing clean, efficient code and building \
                       user-centric solutions. I thrive in collaborative environments and am \
                       always eager to tackle new challenges and learn emerging technologies."
                .to_string(),
            availability_status: "Actively looking for new opportunities".to_string(),
        },
        skills: vec![
            SkillCategory {
                category: "Frontend".to_string(),
                items: vec![
                    skill("React", 90),
                    skill("Next.js", 90),
                    skill("TypeScript", 85),
                    skill("JavaScript (ES6+)", 95),
                    skill("Tailwind CSS", 95),
                    skill("HTML5 & CSS3", 95),
                    skill("Redux", 80),
                ],
            },
            SkillCategory {
                category: "Backend".to_string(),
                items: vec![
                    skill("Node.js", 90),
                    skill("Express.js", 85),
                    skill("REST APIs", 95),
                    skill("GraphQL", 75),
                    skill("Firebase", 80),
                ],
            },
            SkillCategory {
                category: "Databases".to_string(),
                items: vec![
                    skill("MongoDB", 85),
                    skill("PostgreSQL", 70),
                    skill("Mongoose", 85),
                    skill("Prisma", 75),
                ],
            },
            SkillCategory {
                category: "Tools & DevOps".to_string(),
                items: vec![
                    skill("Git & GitHub", 95),
                    skill("Docker", 70),
                    skill("Vercel", 90),
                    skill("Webpack", 75),
                    skill("Jest & RTL", 80),
                ],
            },
        ],
        projects: vec![
            Project {
                name: "SaaS Web Monitoring Platform".to_string(),
                slug: "web-monitor-saas".to_string(),
                short_description: "An SDK and dashboard for real-time web performance and error \
                                    tracking."
                    .to_string(),
                long_description: "A comprehensive SaaS platform that provides developers with \
                                   tools to monitor their web applications in real-time. It \
                                   includes a lightweight SDK for data collection and a powerful \
                                   dashboard for visualizing performance metrics, tracking \
                                   errors, and setting up alerts."
                    .to_string(),
                tech_stack: strings(&[
                    "Next.js",
                    "TypeScript",
                    "Node.js",
                    "MongoDB",
                    "Express",
                    "Chart.js",
                    "Tailwind CSS",
                ]),
                role: "Lead Full-Stack Developer".to_string(),
                highlights: strings(&[
                    "Developed a performant data ingestion pipeline with Node.js and Express.",
                    "Built an interactive and real-time dashboard using Next.js and WebSockets.",
                    "Designed a flexible database schema with MongoDB for time-series data.",
                    "Implemented a lightweight client-side SDK to capture metrics with minimal overhead.",
                ]),
                github_url: Some("https://github.com/afroz-sh/web-monitor-saas".to_string()),
                live_url: Some("https://web-monitor.dev".to_string()),
                is_featured: true,
            },
            Project {
                name: "E-commerce MERN App".to_string(),
                slug: "e-commerce-mern".to_string(),
                short_description: "A full-featured e-commerce store built with the MERN stack."
                    .to_string(),
                long_description: "A complete e-commerce solution with features like product \
                                   catalog, shopping cart, user authentication, order management, \
                                   and payment integration. Built from the ground up to be \
                                   scalable and secure."
                    .to_string(),
                tech_stack: strings(&[
                    "MongoDB",
                    "Express",
                    "React",
                    "Node.js",
                    "Redux",
                    "Stripe API",
                ]),
                role: "Full-Stack Developer".to_string(),
                highlights: strings(&[
                    "Implemented JWT-based authentication and authorization for users and admins.",
                    "Integrated Stripe for secure payment processing.",
                    "Developed a responsive and intuitive user interface with React and Redux.",
                ]),
                github_url: Some("https://github.com/afroz-sh/e-commerce-mern".to_string()),
                live_url: None,
                is_featured: true,
            },
            Project {
                name: "Task Management Tool".to_string(),
                slug: "task-manager".to_string(),
                short_description: "A Kanban-style task management tool for teams.".to_string(),
                long_description: "A collaborative, real-time task management application \
                                   inspired by Trello. Users can create boards, lists, and \
                                   cards, assign tasks, and track progress with a drag-and-drop \
                                   interface."
                    .to_string(),
                tech_stack: strings(&[
                    "React",
                    "Firebase",
                    "Tailwind CSS",
                    "React-beautiful-dnd",
                ]),
                role: "Frontend Developer (Freelance)".to_string(),
                highlights: strings(&[
                    "Built a real-time, collaborative UI using Firebase Realtime Database.",
                    "Implemented a smooth drag-and-drop functionality for tasks and lists.",
                    "Designed a clean and modern UI with Tailwind CSS.",
                ]),
                github_url: Some("https://github.com/afroz-sh/task-manager".to_string()),
                live_url: None,
                is_featured: false,
            },
            Project {
                name: "Personal Portfolio v1".to_string(),
                slug: "portfolio-v1".to_string(),
                short_description: "My previous personal portfolio website.".to_string(),
                long_description: "My first iteration of a personal portfolio, built to showcase \
                                   my projects and skills. It was a static site generated with \
                                   Next.js, focused on clean design and performance."
                    .to_string(),
                tech_stack: strings(&["Next.js", "React", "Styled-Components"]),
                role: "Developer".to_string(),
                highlights: strings(&[
                    "Focused on SEO and performance best practices.",
                    "Designed and built from scratch.",
                ]),
                github_url: Some("https://github.com/afroz-sh/portfolio-v1".to_string()),
                live_url: None,
                is_featured: false,
            },
        ],
        experience: vec![
            Experience {
                company: "Digital Innovations Inc.".to_string(),
                role: "Full-Stack Developer".to_string(),
                period: "Jan 2022 - Present".to_string(),
                location: "Mumbai, India (Remote)".to_string(),
                description: "Contributed to various client projects, from large-scale \
                              enterprise applications to fast-paced startup MVPs, using modern \
                              web technologies."
                    .to_string(),
                responsibilities: strings(&[
                    "Led the development of a Next.js-based CMS for a major media client.",
                    "Collaborated with a team of 5 developers to build and maintain a complex SaaS application.",
                    "Mentored junior developers and conducted code reviews to ensure code quality.",
                    "Optimized application performance, achieving a 30% reduction in load times.",
                ]),
            },
            Experience {
                company: "Tech Solutions Co.".to_string(),
                role: "Backend Intern".to_string(),
                period: "Jun 2021 - Dec 2021".to_string(),
                location: "Pune, India".to_string(),
                description: "Worked with the backend team on developing and maintaining REST \
                              APIs for their flagship product."
                    .to_string(),
                responsibilities: strings(&[
                    "Assisted in developing new API endpoints using Node.js and Express.",
                    "Wrote unit and integration tests, increasing test coverage by 15%.",
                    "Managed database schemas and queries in MongoDB.",
                ]),
            },
        ],
        education: vec![Education {
            degree: "Bachelor of Engineering in Computer Science".to_string(),
            institution: "University of Mumbai".to_string(),
            period: "2018 - 2022".to_string(),
            description: Some(
                "Graduated with First Class Honours. Focused on data structures, algorithms, \
                 and web development."
                    .to_string(),
            ),
        }],
        achievements: vec![
            Achievement {
                title: "Hackathon Winner".to_string(),
                description: "1st place at the 2021 CodeFest Hackathon for building a prototype \
                              of a real-time-sync document editor."
                    .to_string(),
                link: Some("https://devpost.com/afroz-sh/codefest-winner".to_string()),
            },
            Achievement {
                title: "LeetCode".to_string(),
                description: "Solved over 300+ problems, honing skills in algorithms and data \
                              structures."
                    .to_string(),
                link: Some("https://leetcode.com/afroz-sh/".to_string()),
            },
            Achievement {
                title: "Open Source Contributor".to_string(),
                description: "Contributed to several open-source projects, including \
                              documentation and bug fixes for a popular UI library."
                    .to_string(),
                link: None,
            },
        ],
        links: vec![
            Link {
                link_type: LinkType::Email,
                label: "Email".to_string(),
                url: "mailto:afroz@example.com".to_string(),
            },
            Link {
                link_type: LinkType::Github,
                label: "GitHub".to_string(),
                url: "https://github.com/afroz-sh".to_string(),
            },
            Link {
                link_type: LinkType::Linkedin,
                label: "LinkedIn".to_string(),
                url: "https://linkedin.com/in/afroz-sh".to_string(),
            },
            Link {
                link_type: LinkType::Portfolio,
                label: "Portfolio".to_string(),
                url: "https://afroz-portfolio.dev".to_string(),
            },
        ],
    }
}
