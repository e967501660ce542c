//! Built-in typography and code themes.

use super::{CodeTheme, TypographyTheme};

/// Shared by every code theme's block style.
const CODE_FONT_SIZE: &str = "12px";
const CODE_LINE_HEIGHT: &str = "1.45";
const CODE_PADDING: &str = "16px";
const CODE_RADIUS: &str = "6px";

pub static TYPOGRAPHY_THEMES: &[TypographyTheme] = &[
    TypographyTheme {
        id: "classic",
        name: "经典优雅",
        description: "简洁大方的经典排版",
        sample: "优雅而简洁的文字排版",
        container_style: &[
            ("fontFamily", "\"Times New Roman\", serif"),
            ("fontSize", "16px"),
            ("lineHeight", "1.6"),
            ("color", "#333"),
            ("backgroundColor", "#fff"),
            ("maxWidth", "800px"),
            ("margin", "0 auto"),
            ("padding", "20px"),
        ],
        heading_style: &[
            ("fontFamily", "\"Georgia\", serif"),
            ("fontWeight", "bold"),
            ("color", "#222"),
            ("marginTop", "1.5em"),
            ("marginBottom", "0.5em"),
        ],
    },
    TypographyTheme {
        id: "modern",
        name: "现代简约",
        description: "现代感十足的简约设计",
        sample: "现代简约的设计风格",
        container_style: &[
            ("fontFamily", "\"Helvetica Neue\", Helvetica, Arial, sans-serif"),
            ("fontSize", "16px"),
            ("lineHeight", "1.7"),
            ("color", "#333"),
            ("backgroundColor", "#fafafa"),
            ("maxWidth", "900px"),
            ("margin", "0 auto"),
            ("padding", "30px"),
            ("borderRadius", "8px"),
        ],
        heading_style: &[
            ("fontFamily", "\"Helvetica Neue\", Helvetica, Arial, sans-serif"),
            ("fontWeight", "300"),
            ("color", "#222"),
            ("marginTop", "2em"),
            ("marginBottom", "0.8em"),
            ("letterSpacing", "-0.02em"),
        ],
    },
    TypographyTheme {
        id: "book",
        name: "图书风格",
        description: "类似纸质图书的阅读体验",
        sample: "如同阅读纸质图书般舒适",
        container_style: &[
            ("fontFamily", "\"Bookerly\", \"Times New Roman\", serif"),
            ("fontSize", "17px"),
            ("lineHeight", "1.8"),
            ("color", "#2c2c2c"),
            ("backgroundColor", "#f9f6f0"),
            ("maxWidth", "700px"),
            ("margin", "0 auto"),
            ("padding", "40px"),
            ("boxShadow", "0 0 20px rgba(0,0,0,0.1)"),
        ],
        heading_style: &[
            ("fontFamily", "\"Bookerly\", \"Times New Roman\", serif"),
            ("fontWeight", "normal"),
            ("color", "#1a1a1a"),
            ("marginTop", "2.5em"),
            ("marginBottom", "1em"),
            ("textAlign", "center"),
        ],
    },
    TypographyTheme {
        id: "magazine",
        name: "杂志风格",
        description: "时尚杂志般的精美排版",
        sample: "精美时尚的杂志风格",
        container_style: &[
            ("fontFamily", "\"Playfair Display\", serif"),
            ("fontSize", "16px"),
            ("lineHeight", "1.6"),
            ("color", "#333"),
            ("backgroundColor", "#fff"),
            ("maxWidth", "1000px"),
            ("margin", "0 auto"),
            ("padding", "50px"),
            (
                "backgroundImage",
                "linear-gradient(135deg, #f5f7fa 0%, #c3cfe2 100%)",
            ),
        ],
        heading_style: &[
            ("fontFamily", "\"Playfair Display\", serif"),
            ("fontWeight", "400"),
            ("color", "#1a1a1a"),
            ("marginTop", "2em"),
            ("marginBottom", "0.5em"),
            ("textTransform", "uppercase"),
            ("letterSpacing", "0.1em"),
            ("fontSize", "1.2em"),
        ],
    },
    TypographyTheme {
        id: "academic",
        name: "学术论文",
        description: "适合学术论文的专业排版",
        sample: "专业严谨的学术风格",
        container_style: &[
            ("fontFamily", "\"Times New Roman\", serif"),
            ("fontSize", "12pt"),
            ("lineHeight", "1.5"),
            ("color", "#000"),
            ("backgroundColor", "#fff"),
            ("maxWidth", "800px"),
            ("margin", "0 auto"),
            ("padding", "25px"),
            ("textAlign", "justify"),
        ],
        heading_style: &[
            ("fontFamily", "\"Times New Roman\", serif"),
            ("fontWeight", "bold"),
            ("color", "#000"),
            ("marginTop", "1.5em"),
            ("marginBottom", "0.5em"),
            ("textAlign", "center"),
        ],
    },
    TypographyTheme {
        id: "novel",
        name: "小说阅读",
        description: "专为小说阅读优化的舒适体验",
        sample: "沉浸式的小说阅读体验",
        container_style: &[
            (
                "fontFamily",
                "\"Palatino Linotype\", \"Book Antiqua\", Palatino, serif",
            ),
            ("fontSize", "18px"),
            ("lineHeight", "1.8"),
            ("color", "#2c2c2c"),
            ("backgroundColor", "#fefefe"),
            ("maxWidth", "600px"),
            ("margin", "0 auto"),
            ("padding", "60px 40px"),
            ("textAlign", "justify"),
            ("textIndent", "2em"),
        ],
        heading_style: &[
            (
                "fontFamily",
                "\"Palatino Linotype\", \"Book Antiqua\", Palatino, serif",
            ),
            ("fontWeight", "normal"),
            ("color", "#1a1a1a"),
            ("marginTop", "3em"),
            ("marginBottom", "1.5em"),
            ("textAlign", "center"),
            ("fontSize", "1.5em"),
        ],
    },
];

pub static CODE_THEMES: &[CodeTheme] = &[
    CodeTheme {
        id: "github",
        name: "GitHub 主题",
        description: "GitHub 官方代码高亮主题",
        sample: "function hello() {\n  console.log(\"Hello World!\");\n}",
        block_style: &[
            ("backgroundColor", "#f6f8fa"),
            ("color", "#24292e"),
            ("border", "1px solid #e1e4e8"),
            ("borderRadius", CODE_RADIUS),
            (
                "fontFamily",
                "\"SFMono-Regular\", Consolas, \"Liberation Mono\", Menlo, monospace",
            ),
            ("fontSize", CODE_FONT_SIZE),
            ("lineHeight", CODE_LINE_HEIGHT),
            ("padding", CODE_PADDING),
            ("overflow", "auto"),
        ],
        keyword_color: "#d73a49",
        string_color: "#032f62",
        comment_color: "#6a737d",
        function_color: "#6f42c1",
    },
    CodeTheme {
        id: "monokai",
        name: "Monokai 主题",
        description: "经典的 Monokai 代码主题",
        sample: "def fibonacci(n):\n    if n <= 1:\n        return n",
        block_style: &[
            ("backgroundColor", "#272822"),
            ("color", "#f8f8f2"),
            ("border", "1px solid #49483e"),
            ("borderRadius", CODE_RADIUS),
            ("fontFamily", "\"Monaco\", \"Menlo\", \"Ubuntu Mono\", monospace"),
            ("fontSize", CODE_FONT_SIZE),
            ("lineHeight", CODE_LINE_HEIGHT),
            ("padding", CODE_PADDING),
            ("overflow", "auto"),
        ],
        keyword_color: "#f92672",
        string_color: "#e6db74",
        comment_color: "#75715e",
        function_color: "#a6e22e",
    },
    CodeTheme {
        id: "dracula",
        name: "Dracula 主题",
        description: "深受喜爱的暗色代码主题",
        sample: "const greet = (name) => {\n  return `Hello, ${name}!`;\n};",
        block_style: &[
            ("backgroundColor", "#282a36"),
            ("color", "#f8f8f2"),
            ("border", "1px solid #44475a"),
            ("borderRadius", CODE_RADIUS),
            ("fontFamily", "\"Fira Code\", \"Monaco\", \"Menlo\", monospace"),
            ("fontSize", CODE_FONT_SIZE),
            ("lineHeight", CODE_LINE_HEIGHT),
            ("padding", CODE_PADDING),
            ("overflow", "auto"),
        ],
        keyword_color: "#ff79c6",
        string_color: "#f1fa8c",
        comment_color: "#6272a4",
        function_color: "#50fa7b",
    },
    CodeTheme {
        id: "solarized",
        name: "Solarized 主题",
        description: "精心调校的配色方案",
        sample: "public class Hello {\n    public static void main(String[] args) {\n        System.out.println(\"Hello World\");\n    }\n}",
        block_style: &[
            ("backgroundColor", "#fdf6e3"),
            ("color", "#586e75"),
            ("border", "1px solid #eee8d5"),
            ("borderRadius", CODE_RADIUS),
            ("fontFamily", "\"Source Code Pro\", \"Monaco\", monospace"),
            ("fontSize", CODE_FONT_SIZE),
            ("lineHeight", CODE_LINE_HEIGHT),
            ("padding", CODE_PADDING),
            ("overflow", "auto"),
        ],
        keyword_color: "#dc322f",
        string_color: "#2aa198",
        comment_color: "#93a1a1",
        function_color: "#268bd2",
    },
    CodeTheme {
        id: "atom",
        name: "Atom One 主题",
        description: "Atom 编辑器的经典主题",
        sample: "import React from \"react\";\n\nfunction App() {\n  return <div>Hello React!</div>;\n}",
        block_style: &[
            ("backgroundColor", "#fafafa"),
            ("color", "#383a42"),
            ("border", "1px solid #e5e5e6"),
            ("borderRadius", CODE_RADIUS),
            ("fontFamily", "\"Fira Code\", \"Monaco\", monospace"),
            ("fontSize", CODE_FONT_SIZE),
            ("lineHeight", CODE_LINE_HEIGHT),
            ("padding", CODE_PADDING),
            ("overflow", "auto"),
        ],
        keyword_color: "#a626a4",
        string_color: "#50a14f",
        comment_color: "#a0a1a7",
        function_color: "#4078f2",
    },
    CodeTheme {
        id: "vs-code",
        name: "VS Code 主题",
        description: "Visual Studio Code 默认主题",
        sample: "let message = \"Hello TypeScript!\";\nconsole.log(message);",
        block_style: &[
            ("backgroundColor", "#1e1e1e"),
            ("color", "#d4d4d4"),
            ("border", "1px solid #3e3e42"),
            ("borderRadius", CODE_RADIUS),
            ("fontFamily", "\"Consolas\", \"Monaco\", monospace"),
            ("fontSize", CODE_FONT_SIZE),
            ("lineHeight", CODE_LINE_HEIGHT),
            ("padding", CODE_PADDING),
            ("overflow", "auto"),
        ],
        keyword_color: "#569cd6",
        string_color: "#ce9178",
        comment_color: "#6a9955",
        function_color: "#dcdcaa",
    },
];
