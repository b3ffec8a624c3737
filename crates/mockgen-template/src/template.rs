//! Mock templates
//!
//! A trait mock consists of four items rendered in order:
//! the mock struct, its inherent impl, a `Default` impl and the trait impl.
//! Every method gets a call counter and a handler slot; the
//! [`RenderOptions`] switches add argument history, observable subjects,
//! public counters or helper-function bodies. A non-unit method called
//! without a handler panics with `unimplemented!`.

use mockgen_model::{EntityKey, MethodDecl, ParamDecl, RenderOptions, TraitDecl};

const INDENT: &str = "    ";

/// Capacity of generated broadcast subjects
const SUBJECT_CAPACITY: usize = 16;

/// Render the full mock for a trait declaration
///
/// `encloser` names both the implemented trait and the mock (`<encloser>Mock`).
/// Rendering is deterministic: identical inputs give identical text.
#[must_use]
pub fn render_trait_mock(
    key: &EntityKey,
    encloser: &str,
    decl: &TraitDecl,
    options: &RenderOptions,
) -> String {
    let mock_name = format!("{encloser}Mock");
    let methods: Vec<MethodTemplate<'_>> = decl
        .methods
        .iter()
        .map(|method| MethodTemplate::new(method, options))
        .collect();

    let mut out = Lines::default();
    out.push(0, format!("/// Mock for `{key}`"));
    render_struct(&mut out, &mock_name, &methods, options);
    out.blank();
    render_inherent_impl(&mut out, &mock_name, &methods, options);
    out.blank();
    render_default_impl(&mut out, &mock_name);
    out.blank();
    render_trait_impl(&mut out, encloser, &mock_name, &methods, options);
    out.finish()
}

/// Line buffer with indentation
#[derive(Default)]
struct Lines(Vec<String>);

impl Lines {
    fn push(&mut self, depth: usize, text: impl AsRef<str>) {
        self.0.push(format!("{}{}", INDENT.repeat(depth), text.as_ref()));
    }

    fn blank(&mut self) {
        self.0.push(String::new());
    }

    fn finish(self) -> String {
        self.0.join("\n")
    }
}

/// Per-method naming and shape, derived once per render
struct MethodTemplate<'a> {
    method: &'a MethodDecl,
    stream_item: Option<String>,
    /// History element type; `None` when arguments are not recorded
    history_type: Option<String>,
}

impl<'a> MethodTemplate<'a> {
    fn new(method: &'a MethodDecl, options: &RenderOptions) -> Self {
        let stream_item = if options.use_mock_observable {
            method.stream_item()
        } else {
            None
        };

        let history_type = if options.enable_func_args_history {
            history_type(&method.params)
        } else {
            None
        };

        Self {
            method,
            stream_item,
            history_type,
        }
    }

    fn records_args(&self) -> bool {
        self.history_type.is_some()
    }

    fn call_count_field(&self) -> String {
        format!("{}_call_count", self.method.name)
    }

    fn handler_field(&self) -> String {
        format!("{}_handler", self.method.name)
    }

    fn arg_values_field(&self) -> String {
        format!("{}_arg_values", self.method.name)
    }

    fn subject_field(&self) -> String {
        format!("{}_subject", self.method.name)
    }

    fn return_type(&self) -> &str {
        self.method.return_type.as_deref().unwrap_or("()")
    }

    fn returns_unit(&self) -> bool {
        matches!(self.return_type().trim(), "()" | "")
    }

    fn handler_type(&self) -> String {
        let params: Vec<&str> = self.method.params.iter().map(|p| p.ty.as_str()).collect();
        format!(
            "Option<Box<dyn Fn({}) -> {} + Send + Sync>>",
            params.join(", "),
            self.return_type()
        )
    }

    fn history_value(&self) -> String {
        let values: Vec<String> = self
            .method
            .params
            .iter()
            .map(|p| {
                if p.ty.trim_start().starts_with('&') {
                    format!("{}.to_owned()", p.name)
                } else {
                    format!("{}.clone()", p.name)
                }
            })
            .collect();

        match values.as_slice() {
            [single] => single.clone(),
            values => format!("({})", values.join(", ")),
        }
    }

    fn call_args(&self) -> String {
        let names: Vec<&str> = self.method.params.iter().map(|p| p.name.as_str()).collect();
        names.join(", ")
    }

    fn signature(&self) -> String {
        let mut params = vec![self.method.receiver.as_str().to_string()];
        params.extend(self.method.params.iter().map(|p| format!("{}: {}", p.name, p.ty)));

        let asyncness = if self.method.is_async { "async " } else { "" };
        let ret = if self.returns_unit() {
            String::new()
        } else {
            format!(" -> {}", self.return_type())
        };
        format!("{asyncness}fn {}({}){ret}", self.method.name, params.join(", "))
    }
}

fn render_struct(
    out: &mut Lines,
    mock_name: &str,
    methods: &[MethodTemplate<'_>],
    options: &RenderOptions,
) {
    let count_vis = if options.allow_set_call_count { "pub " } else { "" };

    out.push(0, format!("pub struct {mock_name} {{"));
    for method in methods {
        out.push(1, format!("{count_vis}{}: AtomicUsize,", method.call_count_field()));
        if let Some(item) = &method.stream_item {
            out.push(1, format!("pub {}: broadcast::Sender<{item}>,", method.subject_field()));
        } else {
            out.push(1, format!("pub {}: {},", method.handler_field(), method.handler_type()));
        }
        if let Some(history_type) = &method.history_type {
            out.push(
                1,
                format!("pub {}: Mutex<Vec<{history_type}>>,", method.arg_values_field()),
            );
        }
    }
    out.push(0, "}");
}

fn render_inherent_impl(
    out: &mut Lines,
    mock_name: &str,
    methods: &[MethodTemplate<'_>],
    options: &RenderOptions,
) {
    out.push(0, format!("impl {mock_name} {{"));
    out.push(1, "pub fn new() -> Self {");
    out.push(2, "Self {");
    for method in methods {
        out.push(3, format!("{}: AtomicUsize::new(0),", method.call_count_field()));
        if method.stream_item.is_some() {
            out.push(
                3,
                format!("{}: broadcast::channel({SUBJECT_CAPACITY}).0,", method.subject_field()),
            );
        } else {
            out.push(3, format!("{}: None,", method.handler_field()));
        }
        if method.records_args() {
            out.push(3, format!("{}: Mutex::new(Vec::new()),", method.arg_values_field()));
        }
    }
    out.push(2, "}");
    out.push(1, "}");

    if !options.allow_set_call_count {
        for method in methods {
            out.blank();
            out.push(1, format!("pub fn {}(&self) -> usize {{", method.call_count_field()));
            out.push(2, format!("self.{}.load(Ordering::SeqCst)", method.call_count_field()));
            out.push(1, "}");
        }
    }
    out.push(0, "}");
}

fn render_default_impl(out: &mut Lines, mock_name: &str) {
    out.push(0, format!("impl Default for {mock_name} {{"));
    out.push(1, "fn default() -> Self {");
    out.push(2, "Self::new()");
    out.push(1, "}");
    out.push(0, "}");
}

fn render_trait_impl(
    out: &mut Lines,
    encloser: &str,
    mock_name: &str,
    methods: &[MethodTemplate<'_>],
    options: &RenderOptions,
) {
    out.push(0, format!("impl {encloser} for {mock_name} {{"));
    for (i, method) in methods.iter().enumerate() {
        if i > 0 {
            out.blank();
        }
        out.push(1, format!("{} {{", method.signature()));
        if options.use_template_func {
            render_func_body(out, method);
        } else {
            render_inline_body(out, method);
        }
        out.push(1, "}");
    }
    out.push(0, "}");
}

/// Body delegating bookkeeping to the `mock_func` family of helpers
fn render_func_body(out: &mut Lines, method: &MethodTemplate<'_>) {
    if method.records_args() {
        out.push(
            2,
            format!(
                "mock_record(&self.{}, {});",
                method.arg_values_field(),
                method.history_value()
            ),
        );
    }

    if method.stream_item.is_some() {
        out.push(
            2,
            format!(
                "mock_observable(&self.{}, &self.{})",
                method.call_count_field(),
                method.subject_field()
            ),
        );
        return;
    }

    out.push(
        2,
        format!(
            "mock_func(&self.{}, self.{}.as_deref(), |handler| handler({}))",
            method.call_count_field(),
            method.handler_field(),
            method.call_args()
        ),
    );
}

/// Body with the bookkeeping interpolated in place
fn render_inline_body(out: &mut Lines, method: &MethodTemplate<'_>) {
    out.push(
        2,
        format!("self.{}.fetch_add(1, Ordering::SeqCst);", method.call_count_field()),
    );
    if method.records_args() {
        out.push(
            2,
            format!("self.{}.lock().push({});", method.arg_values_field(), method.history_value()),
        );
    }

    if method.stream_item.is_some() {
        out.push(
            2,
            format!(
                "Box::pin(BroadcastStream::new(self.{}.subscribe()).filter_map(|item| std::future::ready(item.ok())))",
                method.subject_field()
            ),
        );
        return;
    }

    out.push(2, format!("if let Some(handler) = &self.{} {{", method.handler_field()));
    if method.returns_unit() {
        out.push(3, format!("handler({});", method.call_args()));
        out.push(2, "}");
    } else {
        out.push(3, format!("return handler({});", method.call_args()));
        out.push(2, "}");
        out.push(2, format!("unimplemented!(\"{} is not set\")", method.handler_field()));
    }
}

/// History element type for a parameter list
///
/// `None` without parameters or when any argument cannot be stored owned.
fn history_type(params: &[ParamDecl]) -> Option<String> {
    match params {
        [] => None,
        [single] => single.owned_ty(),
        params => {
            let tys = params
                .iter()
                .map(ParamDecl::owned_ty)
                .collect::<Option<Vec<String>>>()?;
            Some(format!("({})", tys.join(", ")))
        }
    }
}
