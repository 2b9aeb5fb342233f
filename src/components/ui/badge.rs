use leptos::prelude::*;
use leptos_ui::variants;

// Tag chips. `Active` marks the selected filter.
variants! {
    Badge {
        base: "inline-flex items-center gap-1 rounded-full border px-2.5 py-0.5 text-xs font-medium transition-colors select-none",
        variants: {
            variant: {
                Default: "bg-secondary text-secondary-foreground",
                Outline: "bg-transparent text-muted-foreground hover:bg-accent hover:cursor-pointer",
                Active: "bg-primary text-primary-foreground border-primary hover:cursor-pointer",
            },
            size: {
                Default: "",
            }
        },
        component: {
            element: span
        }
    }
}
