#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryEvent {
    Decoded {
        elements: usize,
        diagnostics: usize,
    },
    Rendered {
        nodes: usize,
        skipped: usize,
    },
}

pub trait TelemetryHook: Send + Sync {
    fn emit(&self, event: TelemetryEvent);
}

#[derive(Default)]
pub struct NullTelemetry;

impl TelemetryHook for NullTelemetry {
    fn emit(&self, _event: TelemetryEvent) {}
}

pub struct CardTelemetry<'a> {
    hook: &'a dyn TelemetryHook,
}

impl<'a> CardTelemetry<'a> {
    pub fn new(hook: &'a dyn TelemetryHook) -> Self {
        Self { hook }
    }

    pub fn decoded(&self, elements: usize, diagnostics: usize) {
        self.hook.emit(TelemetryEvent::Decoded {
            elements,
            diagnostics,
        });
    }

    pub fn rendered(&self, nodes: usize, skipped: usize) {
        self.hook.emit(TelemetryEvent::Rendered { nodes, skipped });
    }
}
