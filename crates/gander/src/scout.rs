use compact_str::CompactString;
use gander_types::{CapturedArguments, FunctionDescriptor, Resource, Uid, Value};
use tracing::debug;

use crate::cloner::Cloner;
use crate::walk::{FoundFunction, ScoutError, find_functions};

/// Options for one scout pass.
#[derive(Clone, Copy)]
pub struct ScoutOptions<'a> {
    /// Capture a bounded clone of each function's call arguments.
    pub capture_arguments: bool,

    /// Capture each function's source text.
    pub capture_source: bool,

    /// Applied to captured arguments.
    pub cloner: &'a Cloner,

    /// Prepended as the first path segment of every descriptor, pointing
    /// out which property of the activity the functions hang off of.
    pub name: Option<&'a str>,
}

/// Scouts the value graph under `root` for functions and finalizes one
/// [`FunctionDescriptor`] per occurrence, stamped with `uid`.
///
/// Live function references are retained only for the duration of this call
/// (and only when capture is requested); descriptors cannot carry one.
/// Argument-access denial is downgraded to
/// [`CapturedArguments::Inaccessible`]; any traversal failure propagates.
pub fn scout_functions(
    root: &Resource,
    uid: &Uid,
    options: &ScoutOptions<'_>,
) -> Result<Vec<FunctionDescriptor>, ScoutError> {
    let capture = options.capture_arguments || options.capture_source;
    let found = find_functions(root, capture)?;

    let descriptors: Vec<FunctionDescriptor> = found
        .into_iter()
        .map(|found| finalize(found, uid, options, capture))
        .collect();

    debug!(%uid, count = descriptors.len(), "scouted functions");
    Ok(descriptors)
}

fn finalize(
    found: FoundFunction,
    uid: &Uid,
    options: &ScoutOptions<'_>,
    capture: bool,
) -> FunctionDescriptor {
    let FoundFunction {
        mut path,
        key,
        level,
        info,
    } = found;

    if let Some(name) = options.name {
        path.insert(0, CompactString::from(name));
    }

    let mut arguments = CapturedArguments::NotRequested;
    let mut source = None;

    if capture {
        // `info.function` is moved out here and dropped when this block
        // ends; the descriptor below is built from plain data only.
        if let Some(function) = info.function {
            arguments = match function.arguments() {
                Ok(args) => CapturedArguments::Captured(Value::Seq(
                    args.iter().map(|arg| options.cloner.clone_resource(arg)).collect(),
                )),
                Err(_) => CapturedArguments::Inaccessible,
            };
            if options.capture_source {
                source = function.source_text().map(str::to_owned);
            }
        }
    }

    FunctionDescriptor {
        path,
        key,
        level,
        info: info.origin,
        id: uid.clone(),
        arguments,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloner::ClonerOptions;
    use gander_types::{FunctionOrigin, LiveFunction};

    fn origin(name: &str) -> FunctionOrigin {
        FunctionOrigin::new("/srv/app/server.rs", 25, 21, name)
    }

    fn nested(function: LiveFunction) -> Resource {
        Resource::map([("a", Resource::map([("b", Resource::Function(function))]))])
    }

    fn plain_options(cloner: &Cloner) -> ScoutOptions<'_> {
        ScoutOptions {
            capture_arguments: false,
            capture_source: false,
            cloner,
            name: None,
        }
    }

    #[test]
    fn builds_path_key_and_level() {
        let cloner = Cloner::new(ClonerOptions::default());
        let root = nested(LiveFunction::new(origin("f")));
        let descriptors =
            scout_functions(&root, &Uid::Num(1), &plain_options(&cloner)).unwrap();

        assert_eq!(descriptors.len(), 1);
        let d = &descriptors[0];
        assert_eq!(d.path, ["a", "b"]);
        assert_eq!(d.key, "b");
        assert_eq!(d.level, 2);
        assert_eq!(d.info, origin("f"));
    }

    #[test]
    fn name_is_prepended_to_every_path() {
        let cloner = Cloner::new(ClonerOptions::default());
        let root = nested(LiveFunction::new(origin("f")));
        let options = ScoutOptions {
            name: Some("owner"),
            ..plain_options(&cloner)
        };
        let descriptors = scout_functions(&root, &Uid::Num(1), &options).unwrap();
        assert_eq!(descriptors[0].path, ["owner", "a", "b"]);
        // Level still counts nesting from the root, not the prefix.
        assert_eq!(descriptors[0].level, 2);
    }

    #[test]
    fn stamps_the_supplied_uid() {
        let cloner = Cloner::new(ClonerOptions::default());
        let root = nested(LiveFunction::new(origin("f")));
        let uid = Uid::from("conn:4");
        let descriptors = scout_functions(&root, &uid, &plain_options(&cloner)).unwrap();
        assert_eq!(descriptors[0].id, uid);
    }

    #[test]
    fn no_capture_leaves_arguments_not_requested() {
        let cloner = Cloner::new(ClonerOptions { buffer_length: 8, string_length: 8 });
        let function = LiveFunction::builder(origin("f"))
            .arguments(vec![Resource::text("ignored")])
            .source_text("fn f() {}")
            .build();
        let descriptors =
            scout_functions(&nested(function), &Uid::Num(2), &plain_options(&cloner)).unwrap();
        assert_eq!(descriptors[0].arguments, CapturedArguments::NotRequested);
        assert!(descriptors[0].source.is_none());
    }

    #[test]
    fn captures_arguments_through_the_cloner() {
        let cloner = Cloner::new(ClonerOptions { buffer_length: 0, string_length: 5 });
        let function = LiveFunction::builder(origin("f"))
            .arguments(vec![Resource::text("hello world"), Resource::Int(3)])
            .build();
        let options = ScoutOptions {
            capture_arguments: true,
            ..plain_options(&cloner)
        };
        let descriptors = scout_functions(&nested(function), &Uid::Num(2), &options).unwrap();

        assert_eq!(
            descriptors[0].arguments,
            CapturedArguments::Captured(Value::Seq(vec![
                Value::Text {
                    data: "hello".to_string(),
                    len: 11,
                },
                Value::Int(3),
            ]))
        );
    }

    #[test]
    fn denied_arguments_downgrade_to_inaccessible() {
        let cloner = Cloner::new(ClonerOptions::default());
        let function = LiveFunction::builder(origin("core")).deny_arguments().build();
        let options = ScoutOptions {
            capture_arguments: true,
            ..plain_options(&cloner)
        };
        let descriptors = scout_functions(&nested(function), &Uid::Num(3), &options).unwrap();
        assert_eq!(descriptors[0].arguments, CapturedArguments::Inaccessible);
    }

    #[test]
    fn source_capture_alone_still_captures_arguments() {
        let cloner = Cloner::new(ClonerOptions { buffer_length: 0, string_length: 16 });
        let function = LiveFunction::builder(origin("f"))
            .arguments(vec![Resource::text("arg")])
            .source_text("fn f(arg: &str) {}")
            .build();
        let options = ScoutOptions {
            capture_source: true,
            ..plain_options(&cloner)
        };
        let descriptors = scout_functions(&nested(function), &Uid::Num(4), &options).unwrap();

        assert!(matches!(descriptors[0].arguments, CapturedArguments::Captured(_)));
        assert_eq!(descriptors[0].source.as_deref(), Some("fn f(arg: &str) {}"));
    }

    #[test]
    fn source_is_absent_when_only_arguments_requested() {
        let cloner = Cloner::new(ClonerOptions::default());
        let function = LiveFunction::builder(origin("f"))
            .source_text("fn f() {}")
            .build();
        let options = ScoutOptions {
            capture_arguments: true,
            ..plain_options(&cloner)
        };
        let descriptors = scout_functions(&nested(function), &Uid::Num(5), &options).unwrap();
        assert!(descriptors[0].source.is_none());
    }

    #[test]
    fn transient_references_are_released_after_scout() {
        let cloner = Cloner::new(ClonerOptions::default());
        let function = LiveFunction::builder(origin("f"))
            .arguments(vec![Resource::text("payload")])
            .build();
        let root = nested(function.clone());
        // One handle here, one inside the root resource.
        assert_eq!(function.handle_count(), 2);

        let options = ScoutOptions {
            capture_arguments: true,
            capture_source: true,
            ..plain_options(&cloner)
        };
        let descriptors = scout_functions(&root, &Uid::Num(6), &options).unwrap();

        assert_eq!(descriptors.len(), 1);
        assert_eq!(function.handle_count(), 2);
    }
}
