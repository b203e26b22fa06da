crate::define_id_enum! {
    /// A language ecosystem that polydoc knows how to document
    ToolchainId {
        TypeScript => "typescript" : "TypeScript" | "ts" | "typedoc",
        Python => "python" : "Python" | "py" | "pdoc",
        Go => "go" : "Go" | "golang",
        Java => "java" : "Java" | "javadoc",
        Rust => "rust" : "Rust" | "rs" | "cargo",
        Doxygen => "doxygen" : "Doxygen" | "doxy" | "c" | "cpp",
    }
}
