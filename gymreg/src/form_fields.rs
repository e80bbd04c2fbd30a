/// Create an enum of form fields, each with a label, that can be iterated
/// over with tab/shift-tab
#[macro_export]
macro_rules! form_fields {
    ($name:ident, $($variant:ident => $label:literal),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            /// Every field, in display order
            pub const FIELDS: &'static [$name] = &[
                $($name::$variant),*
            ];

            /// Where this field sits in `FIELDS`
            fn index(self) -> usize {
                self as usize
            }

            /// What to call the field on screen
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),*
                }
            }

            /// Rotate through the options (e.g. with tab)
            pub fn next(self) -> Self {
                Self::FIELDS[(self.index() + 1) % Self::FIELDS.len()]
            }

            /// Rotate through the options in reverse (e.g. with shift-tab)
            pub fn prev(self) -> Self {
                Self::FIELDS[(self.index() + Self::FIELDS.len() - 1) % Self::FIELDS.len()]
            }
        }
    };
}
