//! Static per-environment lookup tables.
//!
//! Every table is an exhaustive `match` on [`Environment`]. Rows that are
//! genuinely absent for an environment are `None`/empty and the accessor
//! documents the fallback callers get instead.

use crate::domain::environment::Environment;

/// One catalogue item: a starter template or a practical example.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRecord {
    /// Directory name under `<env>/templates/` or `<env>/examples/`.
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

// ── Starter templates ─────────────────────────────────────────────────────────

/// Starter project skeletons shipped for `env`, in display order.
pub fn starter_templates(env: Environment) -> &'static [ItemRecord] {
    match env {
        Environment::Php => &[
            ItemRecord {
                id: "laravel-starter",
                title: "Laravel Starter",
                description: "Laravel application skeleton",
            },
            ItemRecord {
                id: "symfony-starter",
                title: "Symfony Starter",
                description: "Symfony application skeleton",
            },
            ItemRecord {
                id: "wordpress-theme",
                title: "WordPress Theme",
                description: "Block-ready WordPress theme",
            },
            ItemRecord { id: "php-api", title: "PHP API", description: "Framework-free JSON API" },
        ],
        Environment::Webdesign => &[
            ItemRecord {
                id: "react-starter",
                title: "React Starter",
                description: "React single-page app",
            },
            ItemRecord {
                id: "vue-starter",
                title: "Vue Starter",
                description: "Vue 3 single-page app",
            },
            ItemRecord {
                id: "angular-starter",
                title: "Angular Starter",
                description: "Angular workspace",
            },
            ItemRecord {
                id: "vanilla-js",
                title: "Vanilla JS",
                description: "Plain HTML, CSS and JavaScript",
            },
        ],
        Environment::Python => &[
            ItemRecord {
                id: "django-starter",
                title: "Django Starter",
                description: "Django project skeleton",
            },
            ItemRecord {
                id: "flask-starter",
                title: "Flask Starter",
                description: "Flask application factory",
            },
            ItemRecord {
                id: "fastapi-starter",
                title: "FastAPI Starter",
                description: "Async FastAPI service",
            },
            ItemRecord {
                id: "data-science",
                title: "Data Science",
                description: "Notebook-driven analysis layout",
            },
        ],
        Environment::Node => &[
            ItemRecord {
                id: "express-starter",
                title: "Express Starter",
                description: "Express HTTP server",
            },
            ItemRecord {
                id: "nestjs-starter",
                title: "NestJS Starter",
                description: "NestJS modular service",
            },
            ItemRecord {
                id: "nextjs-starter",
                title: "Next.js Starter",
                description: "Next.js full-stack app",
            },
            ItemRecord {
                id: "node-api",
                title: "Node API",
                description: "Minimal Node.js JSON API",
            },
        ],
        Environment::Api => &[
            ItemRecord {
                id: "rest-api",
                title: "REST API",
                description: "Resource-oriented HTTP API",
            },
            ItemRecord {
                id: "graphql-api",
                title: "GraphQL API",
                description: "Schema-first GraphQL server",
            },
            ItemRecord {
                id: "grpc-api",
                title: "gRPC API",
                description: "Protobuf service definition",
            },
            ItemRecord {
                id: "microservice",
                title: "Microservice",
                description: "Single-purpose deployable service",
            },
        ],
        Environment::Integrations => &[
            ItemRecord {
                id: "webhook-handler",
                title: "Webhook Handler",
                description: "Signed webhook receiver",
            },
            ItemRecord {
                id: "database-connector",
                title: "Database Connector",
                description: "Pooled database access layer",
            },
            ItemRecord {
                id: "message-queue",
                title: "Message Queue",
                description: "Queue producer and consumer",
            },
            ItemRecord {
                id: "service-mesh",
                title: "Service Mesh",
                description: "Sidecar-based service wiring",
            },
        ],
        Environment::Mobile => &[
            ItemRecord {
                id: "react-native-starter",
                title: "React Native Starter",
                description: "React Native app",
            },
            ItemRecord {
                id: "flutter-starter",
                title: "Flutter Starter",
                description: "Flutter app",
            },
            ItemRecord {
                id: "expo-starter",
                title: "Expo Starter",
                description: "Managed Expo workflow",
            },
            ItemRecord {
                id: "native-starter",
                title: "Native Starter",
                description: "Platform-native shells",
            },
        ],
        Environment::Devops => &[
            ItemRecord {
                id: "docker-starter",
                title: "Docker Starter",
                description: "Multi-stage container build",
            },
            ItemRecord {
                id: "kubernetes-starter",
                title: "Kubernetes Starter",
                description: "Deployment and service manifests",
            },
            ItemRecord {
                id: "ci-cd-pipeline",
                title: "CI/CD Pipeline",
                description: "Build, test and deploy workflow",
            },
            ItemRecord {
                id: "monitoring",
                title: "Monitoring",
                description: "Metrics and alerting stack",
            },
        ],
        Environment::Testing => &[
            ItemRecord {
                id: "unit-testing",
                title: "Unit Testing",
                description: "Unit test harness",
            },
            ItemRecord {
                id: "integration-testing",
                title: "Integration Testing",
                description: "Service-level test suite",
            },
            ItemRecord {
                id: "e2e-testing",
                title: "E2E Testing",
                description: "Browser end-to-end suite",
            },
            ItemRecord {
                id: "performance-testing",
                title: "Performance Testing",
                description: "Load and soak scenarios",
            },
        ],
    }
}

// ── Practical examples ────────────────────────────────────────────────────────

/// Worked examples shipped for `env`, in display order.
pub fn practical_examples(env: Environment) -> &'static [ItemRecord] {
    match env {
        Environment::Php => &[
            ItemRecord {
                id: "laravel-api-example",
                title: "Laravel API",
                description: "Resource controller with validation",
            },
            ItemRecord {
                id: "symfony-service-example",
                title: "Symfony Service",
                description: "Autowired domain service",
            },
            ItemRecord {
                id: "wordpress-plugin-example",
                title: "WordPress Plugin",
                description: "Hooks and shortcodes",
            },
        ],
        Environment::Webdesign => &[
            ItemRecord {
                id: "react-component-example",
                title: "React Component",
                description: "Typed, tested component",
            },
            ItemRecord {
                id: "vue-composition-example",
                title: "Vue Composition",
                description: "Composition API store",
            },
            ItemRecord {
                id: "css-grid-example",
                title: "CSS Grid",
                description: "Responsive grid layout",
            },
        ],
        Environment::Python => &[
            ItemRecord {
                id: "django-model-example",
                title: "Django Model",
                description: "Model, admin and migration",
            },
            ItemRecord {
                id: "flask-route-example",
                title: "Flask Route",
                description: "Blueprint with request validation",
            },
            ItemRecord {
                id: "pandas-analysis-example",
                title: "Pandas Analysis",
                description: "Clean, group and plot",
            },
        ],
        Environment::Node => &[
            ItemRecord {
                id: "express-middleware-example",
                title: "Express Middleware",
                description: "Error-handling middleware",
            },
            ItemRecord {
                id: "nestjs-service-example",
                title: "NestJS Service",
                description: "Injectable service with tests",
            },
            ItemRecord {
                id: "socket-io-example",
                title: "Socket.IO",
                description: "Realtime rooms and events",
            },
        ],
        Environment::Api => &[
            ItemRecord {
                id: "rest-endpoint-example",
                title: "REST Endpoint",
                description: "Paginated collection endpoint",
            },
            ItemRecord {
                id: "graphql-resolver-example",
                title: "GraphQL Resolver",
                description: "Batched resolver",
            },
            ItemRecord {
                id: "authentication-example",
                title: "Authentication",
                description: "Token issue and refresh",
            },
        ],
        Environment::Integrations => &[
            ItemRecord {
                id: "webhook-receiver-example",
                title: "Webhook Receiver",
                description: "Signature verification",
            },
            ItemRecord {
                id: "database-migration-example",
                title: "Database Migration",
                description: "Reversible migration",
            },
            ItemRecord {
                id: "queue-worker-example",
                title: "Queue Worker",
                description: "Retrying background worker",
            },
        ],
        Environment::Mobile => &[
            ItemRecord {
                id: "react-native-navigation-example",
                title: "React Native Navigation",
                description: "Stack and tabs",
            },
            ItemRecord {
                id: "flutter-widget-example",
                title: "Flutter Widget",
                description: "Stateful widget with tests",
            },
            ItemRecord {
                id: "expo-camera-example",
                title: "Expo Camera",
                description: "Permissions and capture",
            },
        ],
        Environment::Devops => &[
            ItemRecord {
                id: "docker-compose-example",
                title: "Docker Compose",
                description: "Local multi-service stack",
            },
            ItemRecord {
                id: "kubernetes-deployment-example",
                title: "Kubernetes Deployment",
                description: "Rolling update",
            },
            ItemRecord {
                id: "github-actions-example",
                title: "GitHub Actions",
                description: "Matrix CI workflow",
            },
        ],
        Environment::Testing => &[
            ItemRecord {
                id: "jest-unit-test-example",
                title: "Jest Unit Test",
                description: "Mocks and snapshots",
            },
            ItemRecord {
                id: "cypress-e2e-example",
                title: "Cypress E2E",
                description: "Login flow spec",
            },
            ItemRecord {
                id: "load-testing-example",
                title: "Load Testing",
                description: "Ramp-up load profile",
            },
        ],
    }
}

// ── Tooling notes ─────────────────────────────────────────────────────────────

/// Editor and workflow notes used by the generated documentation.
///
/// Several environments have no curated row; callers use the `*_or_default`
/// accessors which fall back to the generic guidance.
#[derive(Debug, Clone, Copy)]
pub struct Tooling {
    pub extensions: Option<&'static [&'static str]>,
    pub install_command: &'static str,
    pub troubleshooting: Option<&'static [&'static str]>,
    pub standards: Option<&'static [&'static str]>,
    pub formatting: Option<&'static [&'static str]>,
    pub testing: Option<&'static [&'static str]>,
}

const GENERIC_EXTENSIONS: &[&str] = &[
    "Language-specific extensions",
    "Debugging tools",
    "Testing frameworks",
];
const GENERIC_TROUBLESHOOTING: &[&str] = &[
    "Check documentation",
    "Verify configuration",
    "Test with minimal setup",
    "Ask for help",
];
const GENERIC_STANDARDS: &[&str] = &[
    "Follow language-specific conventions",
    "Use appropriate tools",
    "Implement proper testing",
];
const GENERIC_FORMATTING: &[&str] = &[
    "Use consistent formatting",
    "Follow style guides",
    "Use automated tools",
];
const GENERIC_TESTING: &[&str] = &[
    "Implement comprehensive testing",
    "Use appropriate testing frameworks",
    "Achieve good coverage",
];

impl Tooling {
    pub fn extensions_or_default(&self) -> &'static [&'static str] {
        self.extensions.unwrap_or(GENERIC_EXTENSIONS)
    }

    pub fn troubleshooting_or_default(&self) -> &'static [&'static str] {
        self.troubleshooting.unwrap_or(GENERIC_TROUBLESHOOTING)
    }

    pub fn standards_or_default(&self) -> &'static [&'static str] {
        self.standards.unwrap_or(GENERIC_STANDARDS)
    }

    pub fn formatting_or_default(&self) -> &'static [&'static str] {
        self.formatting.unwrap_or(GENERIC_FORMATTING)
    }

    pub fn testing_or_default(&self) -> &'static [&'static str] {
        self.testing.unwrap_or(GENERIC_TESTING)
    }
}

pub fn tooling(env: Environment) -> Tooling {
    match env {
        Environment::Php => Tooling {
            extensions: Some(&[
                "PHP Intelephense",
                "PHP Debug",
                "PHP DocBlocker",
                "Composer",
                "Laravel Blade Snippets",
            ]),
            install_command: "composer install",
            troubleshooting: Some(&[
                "Composer issues: Check PHP version and composer.json",
                "Xdebug problems: Verify configuration",
                "Framework errors: Check environment setup",
            ]),
            standards: Some(&[
                "Follow PSR standards (PSR-1, PSR-2, PSR-4, PSR-12)",
                "Use Composer for dependencies",
                "Implement proper autoloading",
            ]),
            formatting: Some(&[
                "Use PHP CS Fixer",
                "Follow PSR-12 standards",
                "Use consistent indentation",
            ]),
            testing: Some(&[
                "Use PHPUnit for testing",
                "Implement unit and integration tests",
                "Achieve 80% code coverage",
            ]),
        },
        Environment::Webdesign => Tooling {
            extensions: Some(&[
                "HTML CSS Support",
                "JavaScript (ES6) code snippets",
                "Auto Rename Tag",
                "Prettier",
                "Live Server",
            ]),
            install_command: "npm install",
            troubleshooting: Some(&[
                "Build issues: Check Node.js version",
                "CSS problems: Verify browser compatibility",
                "JavaScript errors: Check console and linting",
            ]),
            standards: Some(&[
                "Follow responsive design principles",
                "Implement accessibility standards",
                "Use modern CSS practices",
            ]),
            formatting: Some(&[
                "Use Prettier for formatting",
                "Follow BEM methodology",
                "Use consistent naming",
            ]),
            testing: Some(&[
                "Use Jest for unit testing",
                "Implement E2E tests with Cypress",
                "Test accessibility",
            ]),
        },
        Environment::Python => Tooling {
            extensions: Some(&[
                "Python (Microsoft Python extension)",
                "Pylance",
                "Python Debugger",
                "Python Docstring Generator",
                "Jupyter",
            ]),
            install_command: "pip install -r requirements.txt",
            troubleshooting: Some(&[
                "Virtual environment issues: Check Python version",
                "Import errors: Verify package installation",
                "Debugging problems: Check interpreter path",
            ]),
            standards: Some(&[
                "Follow PEP 8 standards",
                "Use virtual environments",
                "Implement type hints",
            ]),
            formatting: Some(&[
                "Use Black for formatting",
                "Follow PEP 8 standards",
                "Use consistent indentation",
            ]),
            testing: Some(&[
                "Use pytest for testing",
                "Implement unit and integration tests",
                "Use coverage tools",
            ]),
        },
        Environment::Node => Tooling {
            extensions: Some(&[
                "JavaScript (ES6) code snippets",
                "Node.js Extension Pack",
                "npm Intellisense",
                "Prettier",
                "ESLint",
            ]),
            install_command: "npm install",
            troubleshooting: Some(&[
                "npm issues: Clear cache and reinstall",
                "Module errors: Check package.json",
                "Build problems: Verify Node.js version",
            ]),
            standards: Some(&[
                "Follow npm best practices",
                "Use modern JavaScript features",
                "Implement proper error handling",
            ]),
            formatting: Some(&[
                "Use Prettier for formatting",
                "Follow ESLint rules",
                "Use consistent naming",
            ]),
            testing: Some(&[
                "Use Jest or Mocha for testing",
                "Implement unit and integration tests",
                "Use testing libraries",
            ]),
        },
        Environment::Api => Tooling {
            extensions: Some(&[
                "REST Client",
                "Thunder Client",
                "Postman",
                "JSON Tools",
                "API Documentation",
            ]),
            install_command: "npm install",
            troubleshooting: None,
            standards: None,
            formatting: None,
            testing: None,
        },
        Environment::Integrations => Tooling {
            extensions: Some(&[
                "Docker",
                "Kubernetes",
                "GitLens",
                "Remote Development",
                "Database Client",
            ]),
            install_command: "npm install",
            troubleshooting: None,
            standards: None,
            formatting: None,
            testing: None,
        },
        Environment::Mobile => Tooling {
            extensions: Some(&[
                "React Native Tools",
                "Flutter",
                "Dart",
                "Expo Tools",
                "Mobile Development",
            ]),
            install_command: "npm install",
            troubleshooting: None,
            standards: None,
            formatting: None,
            testing: None,
        },
        Environment::Devops => Tooling {
            extensions: Some(&[
                "Docker",
                "Kubernetes",
                "GitLens",
                "Remote Development",
                "CI/CD Tools",
            ]),
            install_command: "npm install",
            troubleshooting: None,
            standards: None,
            formatting: None,
            testing: None,
        },
        Environment::Testing => Tooling {
            extensions: Some(&[
                "Jest",
                "Cypress",
                "Testing Library",
                "Coverage Gutters",
                "Test Explorer",
            ]),
            install_command: "npm install",
            troubleshooting: None,
            standards: None,
            formatting: None,
            testing: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_environment_has_templates_and_examples() {
        for env in Environment::ALL {
            assert!(!starter_templates(env).is_empty(), "{env} has no templates");
            assert!(!practical_examples(env).is_empty(), "{env} has no examples");
        }
    }

    #[test]
    fn item_ids_are_unique_per_environment() {
        for env in Environment::ALL {
            let mut ids: Vec<_> = starter_templates(env)
                .iter()
                .chain(practical_examples(env))
                .map(|i| i.id)
                .collect();
            let before = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(before, ids.len(), "duplicate id in {env}");
        }
    }

    #[test]
    fn item_ids_are_directory_safe() {
        for env in Environment::ALL {
            for record in starter_templates(env).iter().chain(practical_examples(env)) {
                assert!(
                    record
                        .id
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                    "{} is not a slug",
                    record.id
                );
            }
        }
    }

    #[test]
    fn uncurated_tooling_falls_back() {
        let api = tooling(Environment::Api);
        assert!(api.standards.is_none());
        assert_eq!(api.standards_or_default(), GENERIC_STANDARDS);

        let php = tooling(Environment::Php);
        assert_eq!(php.install_command, "composer install");
        assert!(php.testing_or_default()[0].contains("PHPUnit"));
    }
}
