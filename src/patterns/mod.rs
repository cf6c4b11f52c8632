//! Keyword and structural pattern tables consulted by the detectors.
//!
//! These are matched with plain case-insensitive substring search
//! against file content that has already been lowercased, so every
//! entry here must itself be lowercase unless a detector states
//! otherwise.

/// Rate limiting in API gateway configurations.
pub static API_GATEWAY_RATE_LIMIT_PATTERNS: &[&str] = &[
    // AWS API Gateway
    "throttlesettings",
    "throttle",
    "ratelimit",
    "burstlimit",
    "aws::apigateway",
    "usage plan",
    "usageplan",
    // Kong
    "rate-limiting",
    "rate_limiting",
    "kong-plugin-rate-limiting",
    // Express (Node.js)
    "express-rate-limit",
    "rate-limiter",
    "ratelimit(",
    // Go libraries
    "golang.org/x/time/rate",
    "rate.limiter",
    "ratelimit.new",
    "throttled",
    "tollbooth",
    // Python libraries
    "flask-limiter",
    "django-ratelimit",
    "slowapi",
    // Redis rate limiting
    "redis-rate-limit",
    "redis:incr",
    "redis.incr",
    // NGINX rate limiting
    "limit_req",
    "limit_conn",
    "limit_rate",
    // Envoy rate limiting
    "envoy.filters.http.ratelimit",
    "rate_limit_service",
    // Cloud provider rate limiting
    "cloudfront.ratelimit",
    "azure.ratelimit",
    // Generic patterns
    "requests per second",
    "requests per minute",
    "max_requests",
    "rate_limit",
    "throttle_rate",
];

/// YAML keys indicating a rate-limit configuration block.
pub static RATE_LIMIT_YAML_KEYS: &[&str] = &[
    "rateLimit",
    "rate_limit",
    "ratelimit",
    "throttle",
    "throttling",
    "requestsPerSecond",
    "requestsPerUnit",
    "burstLimit",
];

/// Service Level Objective configurations.
pub static SLO_PATTERNS: &[&str] = &[
    // SLO/SLI keywords
    "slo:",
    "sli:",
    "service level objective",
    "service level indicator",
    "slo_config",
    "slo-config",
    "sloconfig",
    // OpenSLO format
    "openslo",
    "kind: slo",
    "apiversion: openslo",
    // Prometheus-based SLO
    "sloth",
    "pyrra",
    "slo-libsonnet",
    // Cloud provider SLO
    "google_monitoring_slo",
    "aws_servicelevelobjective",
    "azurerm_monitor_slo",
    // SLO metrics
    "availability_slo",
    "latency_slo",
    "error_rate_slo",
    "slo_target",
    "slo_threshold",
    "objective:",
    // SLO tools
    "nobl9",
    "lightstep",
    "datadog slo",
    // Common SLO patterns
    "99.9%",
    "99.95%",
    "99.99%",
    "four nines",
    "three nines",
    "uptime_target",
    "availability_target",
];

/// YAML keys whose presence (as a substring of a key) indicates SLO
/// configuration.
pub static SLO_YAML_KEYS: &[&str] = &["slo", "objective", "sli", "errorbudget"];

/// Error budget configurations.
pub static ERROR_BUDGET_PATTERNS: &[&str] = &[
    // Error budget keywords
    "error_budget",
    "error-budget",
    "errorbudget",
    "error budget",
    "budget:",
    // Error budget policies
    "error_budget_policy",
    "budget_policy",
    "burn_rate",
    "burnrate",
    "burn-rate",
    // Error budget calculation
    "remaining_budget",
    "budget_remaining",
    "budget_spent",
    "budget_consumption",
    "error_rate_threshold",
    // Alerting based on error budget
    "error_budget_alert",
    "budget_exhausted",
    "budget_burn",
    // SRE tools with error budgets
    "sloth",
    "pyrra",
    "nobl9",
    "openslo",
    // Prometheus error budget queries
    "error_budget{",
    "slo_error_budget",
    // Cloud provider error budgets
    "google_monitoring_slo",
    "consumed_budget",
];

/// YAML keys whose presence indicates an error-budget configuration.
pub static ERROR_BUDGET_YAML_KEYS: &[&str] = &["errorbudget", "error_budget", "burnrate", "burn_rate"];

/// Usage of managed secrets providers.
pub static SECRETS_PROVIDER_PATTERNS: &[&str] = &[
    // AWS Secrets Manager
    "aws-sdk",
    "aws/secretsmanager",
    "getsecretvalue",
    "secretsmanager",
    "aws::secretsmanager",
    // HashiCorp Vault
    "hashicorp/vault",
    "vault.newclient",
    "vault/api",
    // Google Secret Manager
    "cloud.google.com/go/secretmanager",
    "secretmanager.newclient",
    "google-cloud/secret-manager",
    // Azure Key Vault
    "azure-keyvault",
    "azure/keyvault",
    "keyvaultclient",
    // Doppler
    "doppler.com",
    "dopplersdk",
    "@dopplerhq",
    // Infisical
    "infisical",
    "infisical-sdk",
    // 1Password
    "1password",
    "op://",
    // Generic secrets management
    "sealed-secrets",
    "external-secrets",
    "secrets-store-csi",
];

/// Infrastructure-as-code presence.
pub static INFRA_PATTERNS: &[&str] = &[
    // Terraform
    "terraform",
    "provider \"",
    "resource \"",
    "module \"",
    // CloudFormation
    "aws::cloudformation",
    "awscloudformation",
    "resources:",
    // Pulumi
    "pulumi",
    "@pulumi/",
    // CDK
    "aws-cdk",
    "@aws-cdk/",
    // Kubernetes/Helm
    "apiversion:",
    "kind: deployment",
    "kind: service",
    // Ansible
    "ansible",
    "playbook",
];

/// AWS region identifiers.
pub static AWS_REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "af-south-1",
    "ap-east-1",
    "ap-south-1",
    "ap-northeast-3",
    "ap-northeast-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-northeast-1",
    "ca-central-1",
    "eu-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-south-1",
    "eu-west-3",
    "eu-north-1",
    "me-south-1",
    "sa-east-1",
    "us-gov-east-1",
    "us-gov-west-1",
];

/// GCP region identifiers.
pub static GCP_REGIONS: &[&str] = &[
    "us-central1",
    "us-east1",
    "us-east4",
    "us-west1",
    "us-west2",
    "us-west3",
    "us-west4",
    "southamerica-east1",
    "northamerica-northeast1",
    "europe-west1",
    "europe-west2",
    "europe-west3",
    "europe-west4",
    "europe-west6",
    "europe-north1",
    "asia-east1",
    "asia-east2",
    "asia-northeast1",
    "asia-northeast2",
    "asia-northeast3",
    "asia-southeast1",
    "asia-southeast2",
    "australia-southeast1",
];

/// Azure region identifiers.
pub static AZURE_REGIONS: &[&str] = &[
    "eastus",
    "eastus2",
    "southcentralus",
    "westus2",
    "westus3",
    "australiaeast",
    "southeastasia",
    "northeurope",
    "westeurope",
    "uksouth",
    "ukwest",
    "francecentral",
    "germanywestcentral",
    "norwayeast",
    "switzerlandnorth",
    "japaneast",
    "japanwest",
    "centralindia",
    "southindia",
    "westindia",
    "canadacentral",
    "koreacentral",
];

/// Substrings marking a documentation file by name.
pub static DOC_FILE_KEYWORDS: &[&str] = &["readme", "deploy", "install", "setup", "runbook", "docs/"];

/// Extensions marking a documentation file.
pub static DOC_FILE_EXTENSIONS: &[&str] = &[".md", ".rst", ".txt", ".adoc"];

/// Indicators of manual deployment steps in documentation.
pub static MANUAL_STEP_PATTERNS: &[&str] = &[
    // Step-by-step instructions
    "step 1",
    "step 2",
    "1.",
    "2.",
    "3.",
    "first,",
    "then,",
    "next,",
    "finally,",
    // Manual actions
    "manually",
    "by hand",
    "login to",
    "navigate to",
    "click on",
    "open the",
    "go to the console",
    "ssh into",
    "copy the file",
    "run this command",
    // Console/UI instructions
    "in the console",
    "in the dashboard",
    "in the ui",
    "from the web interface",
    "using the portal",
    // Manual verification
    "verify that",
    "check that",
    "make sure",
    "confirm that",
    "ensure that",
    // Manual configuration
    "edit the file",
    "update the",
    "change the",
    "set the value",
    "configure manually",
];

/// Database migration tooling.
pub static MIGRATION_TOOL_PATTERNS: &[&str] = &[
    // Go migration tools
    "golang-migrate",
    "migrate.up",
    "migrate.down",
    "goose",
    "sql-migrate",
    // Node.js/TypeScript
    "knex",
    "sequelize",
    "typeorm",
    "prisma migrate",
    "db-migrate",
    "umzug",
    // Python
    "alembic",
    "django.db.migrations",
    "flask-migrate",
    "yoyo-migrations",
    "sqlalchemy-migrate",
    // Ruby
    "activerecord::migration",
    "rake db:migrate",
    // Java
    "flyway",
    "liquibase",
    // .NET
    "entity framework",
    "fluentmigrator",
    // Generic patterns
    "migrations/",
    "migration.sql",
    "schema_migrations",
    "up.sql",
    "down.sql",
    "migrate up",
    "migrate down",
    "create_table",
    "alter_table",
    "add_column",
    "drop_column",
];

/// Backward-compatible migration hints.
pub static BACKWARD_COMPAT_PATTERNS: &[&str] = &[
    // Explicit backward compatibility
    "backward compatible",
    "backwards compatible",
    "backward-compatible",
    "backwards-compatible",
    "zero-downtime",
    "zero downtime",
    // Expand-contract pattern
    "expand and contract",
    "expand-contract",
    "dual-write",
    "dual write",
    "shadow write",
    // Safe migration practices; weak indicators that must appear in
    // combination (e.g. ADD COLUMN + NULL/DEFAULT) to count.
    "nullable",
    "null: true",
    "default:",
    "default value",
    "add column",
    "null",
    "default",
    // Incremental changes
    "incremental migration",
    "phased migration",
    "blue-green",
    "canary",
    // Documentation about compatibility
    "safe to deploy",
    "rollback safe",
    "reversible",
    "no breaking change",
    "non-breaking",
    // Feature flags for migrations
    "feature flag",
    "feature toggle",
    "flag:",
];

/// Migration validation steps.
pub static MIGRATION_VALIDATION_PATTERNS: &[&str] = &[
    // Explicit validation
    "validate",
    "validation",
    "verify migration",
    "check migration",
    "test migration",
    // Dry run
    "dry-run",
    "dry run",
    "--dry-run",
    "dryrun",
    "simulate",
    "plan",
    "preview",
    // Migration testing
    "migration test",
    "test:migration",
    "migration_test",
    "test_migration",
    // Rollback testing
    "rollback test",
    "test rollback",
    "rollback",
    "revert",
    "migration down",
    "migrate down",
    // Data validation
    "data integrity",
    "consistency check",
    "validate data",
    "check constraint",
    "foreign key check",
    // Schema validation
    "schema validation",
    "validate schema",
    "schema check",
    // CI/CD validation
    "migration ci",
    "ci migration",
    "test:db",
    // Safety checks
    "pre-migration",
    "post-migration",
    "migration hook",
    "before_migrate",
    "after_migrate",
    // Backup before migration
    "backup before",
    "snapshot before",
    "dump before",
];

/// Mutable container image tags (anti-pattern).
pub static MUTABLE_TAGS: &[&str] = &[":latest", ":main", ":master", ":dev", ":develop"];

/// Versioned artifact patterns.
pub static VERSIONING_PATTERNS: &[&str] = &[
    // Semantic versioning
    ":v1",
    ":v2",
    "version:",
    "tag:",
    // Git tags
    "git tag",
    "github.ref",
    "git.tag",
    // Semantic versioning tools
    "semver",
    "semantic-release",
    // Docker image versioning
    "@sha256:",
    "sha-",
    ":build-",
    ":release-",
    // Container registries with versions
    "gcr.io",
    "ecr.aws",
    "quay.io",
    "ghcr.io",
    // Version variables
    "$version",
    "${version}",
    "{{version}}",
];

/// Health-check HTTP endpoints.
pub static HEALTH_PATTERNS: &[&str] = &[
    "/health",
    "\"/health\"",
    "'/health'",
    "healthcheck",
    "health-check",
    "endpoint: /health",
    "path: /health",
    "route('/health')",
    "get('/health')",
    "@get(\"/health\")",
    "@route(\"/health\")",
];

/// Readiness HTTP endpoints.
pub static READY_PATTERNS: &[&str] = &[
    "/ready",
    "\"/ready\"",
    "'/ready'",
    "/readiness",
    "/readyz",
    "endpoint: /ready",
    "path: /ready",
    "route('/ready')",
    "get('/ready')",
    "@get(\"/ready\")",
    "@route(\"/ready\")",
];

/// Correlation/trace ID usage.
pub static CORRELATION_PATTERNS: &[&str] = &[
    // Common correlation ID names
    "correlation-id",
    "correlationid",
    "correlation_id",
    "x-correlation-id",
    "x-request-id",
    "x-trace-id",
    // Request ID (similar concept)
    "request-id",
    "requestid",
    "request_id",
    // Trace ID (from distributed tracing)
    "trace-id",
    "traceid",
    "trace_id",
    "traceparent",
    // OpenTelemetry
    "opentelemetry",
    "otel",
    "trace.traceid",
    // Specific tracing libraries
    "jaeger",
    "zipkin",
    "datadog.trace",
    // AWS X-Ray
    "x-amzn-trace-id",
    "xray",
    // Context propagation
    "propagate",
    "baggage",
    "context.context",
    // Logging with correlation
    "logger.with",
    "log.with",
    "withfield",
];

/// Structured logging libraries and patterns. Weak indicators need two
/// matches; see [`STRONG_STRUCTURED_LOGGING_INDICATORS`].
pub static STRUCTURED_LOGGING_PATTERNS: &[&str] = &[
    // Go libraries
    "logrus",
    "zap",
    "zerolog",
    "slog",
    // Python libraries
    "structlog",
    "python-json-logger",
    "pythonjsonlogger",
    // JavaScript/TypeScript
    "winston",
    "pino",
    "bunyan",
    // Java libraries
    "logback",
    "log4j2",
    "slf4j",
    // .NET libraries
    "serilog",
    "nlog",
    // Ruby libraries
    "semantic_logger",
    "ougai",
    // Structured logging call shapes
    "log.info",
    "log.error",
    "log.warn",
    "logger.info",
    "logger.error",
    "logger.warn",
    "withfields",
    "withfield",
    "with(",
    ".with(",
    // JSON logging
    "json.marshal",
    "json.dumps",
    "json.stringify",
    "log format: json",
    "log_format=json",
    "format=\"json\"",
    // Key-value pairs in logs
    "fields{",
    "fields:",
    "attributes{",
    "context{",
    // ECS (Elastic Common Schema)
    "ecs-logging",
];

/// Structured-logging indicators sufficient on their own.
pub static STRONG_STRUCTURED_LOGGING_INDICATORS: &[&str] = &[
    "structlog",
    "logrus",
    "zerolog",
    "slog",
    "zap",
    "winston",
    "pino",
    "bunyan",
    "serilog",
    "ecs-logging",
];

/// Kubernetes workload kinds that carry container specs.
pub static K8S_WORKLOAD_KINDS: &[&str] = &[
    "Pod",
    "Deployment",
    "StatefulSet",
    "DaemonSet",
    "Job",
    "CronJob",
    "ReplicaSet",
];

/// Ingress annotations configuring rate limits.
pub static INGRESS_RATE_LIMIT_ANNOTATIONS: &[&str] = &[
    "nginx.ingress.kubernetes.io/limit-rps",
    "nginx.ingress.kubernetes.io/limit-rpm",
    "nginx.ingress.kubernetes.io/limit-connections",
    "nginx.ingress.kubernetes.io/limit-burst-multiplier",
    // Traefik rate limiting
    "traefik.ingress.kubernetes.io/rate-limit",
    // Kong rate limiting
    "konghq.com/plugins",
    "rate-limiting.plugin.konghq.com",
];

/// Timeout configuration in code and config files.
pub static TIMEOUT_PATTERNS: &[&str] = &[
    // Generic configuration keys
    "timeout:",
    "timeout=",
    "timeout_seconds",
    "timeoutseconds",
    "request_timeout",
    "read_timeout",
    "write_timeout",
    "idle_timeout",
    "connect_timeout",
    "connection_timeout",
    // Go
    "context.withtimeout",
    "http.client{timeout",
    "readtimeout",
    "writetimeout",
    // JavaScript/TypeScript
    "settimeout(",
    "axios.defaults.timeout",
    // Python
    "requests.get(timeout",
    "socket.settimeout",
    // gRPC deadlines
    "deadline",
    "grpc.withtimeout",
];

/// YAML/JSON keys whose presence (as a key substring) indicates a
/// timeout setting.
pub static TIMEOUT_CONFIG_KEYS: &[&str] = &["timeout", "deadline"];

/// Retry and backoff logic.
pub static RETRY_PATTERNS: &[&str] = &[
    // Generic keywords
    "retry",
    "retries",
    "max_retries",
    "maxretries",
    "retry_count",
    "backoff",
    "exponential backoff",
    "exponential_backoff",
    "jitter",
    // Go libraries
    "cenkalti/backoff",
    "go-retryablehttp",
    "avast/retry-go",
    // Java
    "resilience4j.retry",
    "spring-retry",
    // Python
    "tenacity",
    "retrying",
    "urllib3.util.retry",
    // JavaScript/TypeScript
    "async-retry",
    "p-retry",
    "axios-retry",
    // .NET
    "polly",
];

/// Circuit breaker usage.
pub static CIRCUIT_BREAKER_PATTERNS: &[&str] = &[
    "circuit breaker",
    "circuit-breaker",
    "circuitbreaker",
    "circuit_breaker",
    // Go libraries
    "gobreaker",
    "hystrix-go",
    "sony/gobreaker",
    // Java
    "resilience4j.circuitbreaker",
    "hystrix",
    // JavaScript/TypeScript
    "opossum",
    // Python
    "pybreaker",
    // .NET
    "polly.circuitbreaker",
    // Service mesh
    "outlierdetection",
    "outlier_detection",
    "maxconnections",
    "maxpendingrequests",
];

/// Container images running as a non-root user.
pub static NON_ROOT_USER_PATTERNS: &[&str] = &[
    // Dockerfile directives (lowercased content)
    "user 1000",
    "user 1001",
    "user nobody",
    "user nonroot",
    "user app",
    "user node",
    "adduser",
    "useradd",
    // Kubernetes security contexts
    "runasnonroot",
    "runasuser",
    "securitycontext",
    // Docker Compose
    "user: \"1000",
    "user: '1000",
];

/// Graceful shutdown handling.
pub static GRACEFUL_SHUTDOWN_PATTERNS: &[&str] = &[
    // Signal handling
    "sigterm",
    "sigint",
    "signal.notify",
    "signal.notifycontext",
    "process.on('sigterm'",
    "process.on(\"sigterm\"",
    // Server shutdown hooks
    "graceful shutdown",
    "graceful_shutdown",
    "gracefulshutdown",
    "server.shutdown",
    "srv.shutdown",
    "shutdown hook",
    "shutdownhook",
    "app.shutdown",
    "drain",
    // Kubernetes lifecycle
    "prestop",
    "terminationgraceperiodseconds",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_nonempty() {
        let tables: &[(&str, &[&str])] = &[
            ("API_GATEWAY_RATE_LIMIT_PATTERNS", API_GATEWAY_RATE_LIMIT_PATTERNS),
            ("RATE_LIMIT_YAML_KEYS", RATE_LIMIT_YAML_KEYS),
            ("SLO_PATTERNS", SLO_PATTERNS),
            ("SLO_YAML_KEYS", SLO_YAML_KEYS),
            ("ERROR_BUDGET_PATTERNS", ERROR_BUDGET_PATTERNS),
            ("ERROR_BUDGET_YAML_KEYS", ERROR_BUDGET_YAML_KEYS),
            ("SECRETS_PROVIDER_PATTERNS", SECRETS_PROVIDER_PATTERNS),
            ("INFRA_PATTERNS", INFRA_PATTERNS),
            ("AWS_REGIONS", AWS_REGIONS),
            ("GCP_REGIONS", GCP_REGIONS),
            ("AZURE_REGIONS", AZURE_REGIONS),
            ("DOC_FILE_KEYWORDS", DOC_FILE_KEYWORDS),
            ("DOC_FILE_EXTENSIONS", DOC_FILE_EXTENSIONS),
            ("MANUAL_STEP_PATTERNS", MANUAL_STEP_PATTERNS),
            ("MIGRATION_TOOL_PATTERNS", MIGRATION_TOOL_PATTERNS),
            ("BACKWARD_COMPAT_PATTERNS", BACKWARD_COMPAT_PATTERNS),
            ("MIGRATION_VALIDATION_PATTERNS", MIGRATION_VALIDATION_PATTERNS),
            ("MUTABLE_TAGS", MUTABLE_TAGS),
            ("VERSIONING_PATTERNS", VERSIONING_PATTERNS),
            ("HEALTH_PATTERNS", HEALTH_PATTERNS),
            ("READY_PATTERNS", READY_PATTERNS),
            ("CORRELATION_PATTERNS", CORRELATION_PATTERNS),
            ("STRUCTURED_LOGGING_PATTERNS", STRUCTURED_LOGGING_PATTERNS),
            (
                "STRONG_STRUCTURED_LOGGING_INDICATORS",
                STRONG_STRUCTURED_LOGGING_INDICATORS,
            ),
            ("K8S_WORKLOAD_KINDS", K8S_WORKLOAD_KINDS),
            ("INGRESS_RATE_LIMIT_ANNOTATIONS", INGRESS_RATE_LIMIT_ANNOTATIONS),
            ("TIMEOUT_PATTERNS", TIMEOUT_PATTERNS),
            ("TIMEOUT_CONFIG_KEYS", TIMEOUT_CONFIG_KEYS),
            ("RETRY_PATTERNS", RETRY_PATTERNS),
            ("CIRCUIT_BREAKER_PATTERNS", CIRCUIT_BREAKER_PATTERNS),
            ("NON_ROOT_USER_PATTERNS", NON_ROOT_USER_PATTERNS),
            ("GRACEFUL_SHUTDOWN_PATTERNS", GRACEFUL_SHUTDOWN_PATTERNS),
        ];

        for (name, table) in tables {
            assert!(!table.is_empty(), "{name} must not be empty");
        }
    }

    #[test]
    fn test_region_tables_have_no_duplicates() {
        for table in [AWS_REGIONS, GCP_REGIONS, AZURE_REGIONS] {
            let mut seen = std::collections::HashSet::new();
            for region in table {
                assert!(seen.insert(region), "duplicate region entry: {region}");
            }
        }
    }
}
