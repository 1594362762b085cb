/// Pointer id assigned to the terminal mouse. Terminals expose a single
/// pointer, so every pointer event carries this id.
pub const MOUSE_POINTER_ID: PointerId = 1;

pub type PointerId = u32;

/// Targeted pointer events, named after their DOM counterparts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    PointerCancel(PointerEvent),
    PointerOut(PointerEvent),
    DoubleClick(PointerEvent),
}

impl DomEvent {
    /// DOM event type name (`"pointerdown"`, `"dblclick"`, ...).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PointerDown(_) => "pointerdown",
            Self::PointerMove(_) => "pointermove",
            Self::PointerUp(_) => "pointerup",
            Self::PointerCancel(_) => "pointercancel",
            Self::PointerOut(_) => "pointerout",
            Self::DoubleClick(_) => "dblclick",
        }
    }

    pub fn pointer(&self) -> &PointerEvent {
        match self {
            Self::PointerDown(p)
            | Self::PointerMove(p)
            | Self::PointerUp(p)
            | Self::PointerCancel(p)
            | Self::PointerOut(p)
            | Self::DoubleClick(p) => p,
        }
    }

    pub fn target(&self) -> &str {
        &self.pointer().target
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent {
    /// Id of the element the event is dispatched to.
    pub target: String,
    pub pointer_id: PointerId,
    pub client_x: i32,
    pub client_y: i32,
    pub button: MouseButton,
}

impl PointerEvent {
    pub fn new(target: impl Into<String>, client_x: i32, client_y: i32) -> Self {
        Self {
            target: target.into(),
            pointer_id: MOUSE_POINTER_ID,
            client_x,
            client_y,
            button: MouseButton::Left,
        }
    }
}

/// Untargeted keyboard event, delivered to window listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Tab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    F(u8),
    Other,
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Tab => Key::Tab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Other,
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::KeyEvent> for KeyboardEvent {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        Self {
            key: event.code.into(),
            modifiers: event.modifiers.into(),
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}
