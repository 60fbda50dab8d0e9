//! Static CSS payloads spliced into generated output.
//!
//! These blocks are opaque to the generator: they are copied verbatim and
//! never parsed. They can be replaced through [`GeneratorConfig`].
//!
//! [`GeneratorConfig`]: crate::GeneratorConfig

/// Composite shadow variables, appended to the shared `*` block.
pub const SHADOW_VARIABLES: &str = r#" --shadow-flat: var(--shadow-flat-x) var(--shadow-flat-y)
    var(--shadow-flat-blur) var(--shadow-flat-spread) var(--shadow-flat-color);
  --shadow-raised: var(--shadow-raised-x) var(--shadow-raised-y)
    var(--shadow-raised-blur) var(--shadow-raised-spread)
    var(--shadow-raised-color);
  --shadow-floating: var(--shadow-floating-x) var(--shadow-floating-y)
    var(--shadow-floating-blur) var(--shadow-floating-spread)
    var(--shadow-floating-color);
  --shadow-overlay: var(--shadow-overlay-x) var(--shadow-overlay-y)
    var(--shadow-overlay-blur) var(--shadow-overlay-spread)
    var(--shadow-overlay-color);
    "#;

/// Chevron icon glyphs per theme, emitted at the top of each palette block.
pub const THEME_ICONS: &[(&str, &str)] = &[
    ("day", DAY_ICONS),
    ("dusk", DUSK_ICONS),
    ("night", NIGHT_ICONS),
    ("bright", BRIGHT_ICONS),
];

const DAY_ICONS: &str = r#"  --icon-02-chevron-up: url('data:image/svg+xml,<svg width="24" height="24" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg"><path fill-rule="evenodd" clip-rule="evenodd" d="M6 14.0002L7.41 15.4102L12 10.8302L16.59 15.4102L18 14.0002L12 8.00016L6 14.0002Z" fill="rgba(0, 0, 0, 0.55)"/></svg>');
  --icon-02-chevron-down: url('data:image/svg+xml,<svg width="24" height="24" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg"><path fill-rule="evenodd" clip-rule="evenodd" d="M18 9.41L16.59 8L12 12.58L7.41 8L6 9.41L12 15.41L18 9.41Z" fill="rgba(0, 0, 0, 0.55)"/></svg>');"#;

const DUSK_ICONS: &str = r#"  --icon-02-chevron-up: url('data:image/svg+xml,<svg width="24" height="24" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg"><path fill-rule="evenodd" clip-rule="evenodd" d="M6 14.0002L7.41 15.4102L12 10.8302L16.59 15.4102L18 14.0002L12 8.00016L6 14.0002Z" fill="rgba(255, 255, 255, .550)"/></svg>');
  --icon-02-chevron-down: url('data:image/svg+xml,<svg width="24" height="24" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg"><path fill-rule="evenodd" clip-rule="evenodd" d="M18 9.41L16.59 8L12 12.58L7.41 8L6 9.41L12 15.41L18 9.41Z" fill="rgba(255, 255, 255, .550)"/></svg>');
  "#;

const NIGHT_ICONS: &str = r#"--icon-02-chevron-up: url('data:image/svg+xml,<svg width="24" height="24" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg"><path fill-rule="evenodd" clip-rule="evenodd" d="M6 14.0002L7.41 15.4102L12 10.8302L16.59 15.4102L18 14.0002L12 8.00016L6 14.0002Z" fill="rgb(51, 51, 0)"/></svg>');
  --icon-02-chevron-down: url('data:image/svg+xml,<svg width="24" height="24" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg"><path fill-rule="evenodd" clip-rule="evenodd" d="M18 9.41L16.59 8L12 12.58L7.41 8L6 9.41L12 15.41L18 9.41Z" fill="rgb(51, 51, 0)"/></svg>');
  "#;

const BRIGHT_ICONS: &str = r#" --icon-02-chevron-up: url('data:image/svg+xml,<svg width="24" height="24" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg"><path fill-rule="evenodd" clip-rule="evenodd" d="M6 14.0002L7.41 15.4102L12 10.8302L16.59 15.4102L18 14.0002L12 8.00016L6 14.0002Z" fill="rgba(0, 0, 0, .650)"/></svg>');
  --icon-02-chevron-down: url('data:image/svg+xml,<svg width="24" height="24" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg"><path fill-rule="evenodd" clip-rule="evenodd" d="    M18 9.41L16.59 8L12 12.58L7.41 8L6 9.41L12 15.41L18 9.41Z" fill="rgba(0, 0, 0, .650)"/></svg>');
  "#;

/// Blink animation driving the alarm and warning state indicators.
pub const BLINK_ANIMATION: &str = r#"
@property --alarm-blink-on {
  syntax: "<number>";
  inherits: true;
  initial-value: 1;
}

@property --alarm-blink-off {
  syntax: "<number>";
  inherits: true;
  initial-value: 0;
}

@keyframes warning-blink {
  0% {
    --warning-blink-on: 1;
    --warning-blink-off: 0;
    --alarm-blink-on: 1;
    --alarm-blink-off: 0;
  }

  25% {
    --alarm-blink-on: 0;
    --alarm-blink-off: 1;
  }

  50% {
    --warning-blink-on: 0;
    --warning-blink-off: 1;
    --alarm-blink-on: 1;
    --alarm-blink-off: 0;
  }

  75% {
    --alarm-blink-on: 0;
    --alarm-blink-off: 1;
  }

  100% {
    --warning-blink-on: 1;
    --warning-blink-off: 0;
  }
}

@property --warning-blink-on {
  syntax: "<number>";
  inherits: true;
  initial-value: 1;
}

@property --warning-blink-off {
  syntax: "<number>";
  inherits: true;
  initial-value: 0;
}

:root {
  animation: warning-blink 4s infinite;
  animation-timing-function: steps(1);
}

"#;
