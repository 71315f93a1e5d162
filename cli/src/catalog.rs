//! Declarative catalog of the cloud operations exposed as commands.
//!
//! Every operation becomes one command under `<service> <resource>`. The
//! positional flag of an operation carries the resource id.

/// One operation on a resource (`list`, `describe`, `create`, ...).
#[derive(Debug)]
pub struct OperationSpec {
    pub verb: &'static str,
    pub description: &'static str,
    /// Flag that may be given as the bare token after the verb.
    pub positional: Option<&'static str>,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    /// Accepts the optional `page` / `per_page` flags.
    pub paged: bool,
}

impl OperationSpec {
    /// Operations without any flags become plain leaf commands.
    pub fn takes_flags(&self) -> bool {
        self.positional.is_some()
            || self.paged
            || !self.required.is_empty()
            || !self.optional.is_empty()
    }
}

#[derive(Debug)]
pub struct ResourceSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub operations: &'static [OperationSpec],
}

#[derive(Debug)]
pub struct ServiceSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub resources: &'static [ResourceSpec],
}

const fn op(
    verb: &'static str,
    description: &'static str,
    positional: Option<&'static str>,
    required: &'static [&'static str],
    optional: &'static [&'static str],
    paged: bool,
) -> OperationSpec {
    OperationSpec {
        verb,
        description,
        positional,
        required,
        optional,
        paged,
    }
}

const FACTORY: &[&str] = &["factory_id"];
const PROJECT: &[&str] = &["project_id"];
const PROFILE_FIELDS: &[&str] = &["name", "video_codec", "audio_codec", "width", "height"];

pub const SERVICES: &[ServiceSpec] = &[
    ServiceSpec {
        name: "flip",
        description: "manage your flip service",
        resources: &[
            ResourceSpec {
                name: "factories",
                description: "manage cloud service factories",
                operations: &[
                    op("list", "List all factories", None, &[], &[], true),
                    op(
                        "describe",
                        "describes factory by factory_id",
                        Some("factory_id"),
                        &[],
                        &[],
                        false,
                    ),
                ],
            },
            ResourceSpec {
                name: "profiles",
                description: "manage cloud service profiles",
                operations: &[
                    op("list", "lists profiles by factory_id", None, FACTORY, &[], true),
                    op(
                        "describe",
                        "describes profile by factory_id and its name or id",
                        Some("profile_id"),
                        FACTORY,
                        &["profile_name"],
                        false,
                    ),
                    op(
                        "create",
                        "creates profile",
                        None,
                        &["factory_id", "preset_name"],
                        PROFILE_FIELDS,
                        false,
                    ),
                    op("delete", "deletes profile", Some("profile_id"), FACTORY, &[], false),
                    op(
                        "update",
                        "updates profile",
                        Some("profile_id"),
                        FACTORY,
                        PROFILE_FIELDS,
                        false,
                    ),
                ],
            },
            ResourceSpec {
                name: "videos",
                description: "manage cloud service videos",
                operations: &[
                    op("list", "lists videos by factory_id", None, FACTORY, &[], true),
                    op(
                        "describe",
                        "describes videos by factory_id and its id",
                        Some("video_id"),
                        FACTORY,
                        &[],
                        false,
                    ),
                    op(
                        "create",
                        "creates video",
                        None,
                        &["factory_id", "source_url"],
                        &["profiles", "path", "payload"],
                        false,
                    ),
                    op("cancel", "cancels video", Some("video_id"), FACTORY, &[], false),
                    op("delete", "deletes video", Some("video_id"), FACTORY, &[], false),
                ],
            },
            ResourceSpec {
                name: "encodings",
                description: "manage cloud service encodings",
                operations: &[
                    op("list", "lists all encodings", None, FACTORY, &["video_id"], true),
                    op(
                        "describe",
                        "describes encoding by factory_id and its id",
                        Some("encoding_id"),
                        FACTORY,
                        &[],
                        false,
                    ),
                    op(
                        "cancel",
                        "cancels encoding by factory_id and encoding id",
                        Some("encoding_id"),
                        FACTORY,
                        &[],
                        false,
                    ),
                    op(
                        "signed-urls",
                        "signed-urls by factory_id and encoding id",
                        Some("encoding_id"),
                        FACTORY,
                        &[],
                        false,
                    ),
                    op(
                        "delete",
                        "deletes encoding by factory_id and encoding id",
                        Some("encoding_id"),
                        FACTORY,
                        &[],
                        false,
                    ),
                ],
            },
        ],
    },
    ServiceSpec {
        name: "tts",
        description: "manage your tts service",
        resources: &[
            ResourceSpec {
                name: "projects",
                description: "manage tts service projects",
                operations: &[
                    op("list", "List all Projects", None, &[], &[], false),
                    op(
                        "describe",
                        "describes project by project_id",
                        Some("project_id"),
                        &[],
                        &[],
                        false,
                    ),
                    op(
                        "create",
                        "creates project",
                        None,
                        &["name", "description", "language"],
                        &["sample_rate", "profanity_filter"],
                        false,
                    ),
                    op("delete", "deletes project", Some("project_id"), &[], &[], false),
                    op(
                        "update",
                        "updates project",
                        Some("project_id"),
                        &[],
                        &["name", "description", "language"],
                        false,
                    ),
                ],
            },
            ResourceSpec {
                name: "jobs",
                description: "manage tts service jobs",
                operations: &[
                    op("list", "List all jobs", None, PROJECT, &[], true),
                    op(
                        "create",
                        "Create job",
                        None,
                        &["project_id", "source_url"],
                        &["name", "custom_words"],
                        false,
                    ),
                    op("describe", "Describe job", Some("job_id"), PROJECT, &[], false),
                    op("delete", "Delete job", Some("job_id"), PROJECT, &[], false),
                    op("result", "Describe job result", Some("job_id"), PROJECT, &[], false),
                    op("outputs", "Describe job outputs", Some("job_id"), PROJECT, &[], false),
                ],
            },
            ResourceSpec {
                name: "corpora",
                description: "manage tts service corpora",
                operations: &[
                    op("list", "List all corpora", None, PROJECT, &[], false),
                    op(
                        "describe",
                        "describes corpus by project_id and corpus name",
                        Some("corpus_name"),
                        PROJECT,
                        &[],
                        false,
                    ),
                    op(
                        "create",
                        "creates corpus",
                        None,
                        &["project_id", "corpus_name", "corpus_body"],
                        &[],
                        false,
                    ),
                    op("delete", "deletes corpus", Some("corpus_name"), PROJECT, &[], false),
                ],
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_verbs_unique_per_resource() {
        for service in SERVICES {
            for resource in service.resources {
                let mut seen = HashSet::new();
                for operation in resource.operations {
                    assert!(
                        seen.insert(operation.verb),
                        "{} {} {}",
                        service.name,
                        resource.name,
                        operation.verb
                    );
                }
            }
        }
    }

    #[test]
    fn test_projects_list_takes_no_flags() {
        let projects = SERVICES[1].resources[0].operations;
        assert!(!projects[0].takes_flags());
        assert!(projects[1].takes_flags());
    }
}
