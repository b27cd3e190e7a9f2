//! Built-in sample content
//!
//! The starting base document, the starting rewrite prompt, and example
//! documents that exercise most of the Markdown features the templates style.

/// Base document of a fresh session.
pub const DEFAULT_BASE_CONTENT: &str = "# Welcome to ContentMorph

Type your original text or Markdown here.
The preview shows the rendered result as you edit.

### Minimal design
The interface follows a clean, minimal look:
- **Rounded corners**: softer visual edges.
- **Frosted glass**: gentle translucent surfaces.
- **Typography**: generous whitespace and letter spacing.

Try the **AI style variants** below to see different layouts.";

/// Prompt of the initial variant.
pub const DEFAULT_VARIANT_PROMPT: &str = "You are an experienced social media editor.
Rewrite the given text as a lifestyle social post.
Requirements: an emoji in the title, emojis throughout for readability, and a few relevant hashtags.
Output format: Markdown.";

/// Prompt given to variants added later, meant to be overwritten.
pub const NEW_VARIANT_PROMPT: &str = "Rewrite the original text as...";

const BASIC: &str = r#"# Welcome to the Markdown editor

A short example of the most common Markdown formatting.

## Text styles

This is a plain paragraph. You can use **bold**, *italic*, ~~strikethrough~~ and more.

## Lists

Unordered:
- Item 1
- Item 2
- Item 3

Ordered:
1. First step
2. Second step
3. Third step

## Code

Inline code: `console.log('Hello')`

Code block:
```javascript
function greet(name) {
  console.log(`Hello, ${name}!`);
}
```

## Quote

> This is a quotation.
> Use it for sayings or important notes.

## Links

[Visit GitHub](https://github.com)

---

Start editing your content!"#;

const FULL: &str = r#"# Complete Markdown example

## 1. Headings

### Level three
#### Level four
##### Level five
###### Level six

## 2. Text

**Bold** | *Italic* | ***Bold italic*** | ~~Strikethrough~~

H<sub>2</sub>O | X^2^

## 3. Lists

### Unordered
- Item 1
  - Item 1.1
  - Item 1.2
- Item 2

### Ordered
1. First
2. Second
   1. Item 2.1
   2. Item 2.2

### Tasks
- [x] Done
- [ ] To do

## 4. Code

Inline: `const x = 10;`

```javascript
function fibonacci(n) {
  if (n <= 1) return n;
  return fibonacci(n - 1) + fibonacci(n - 2);
}
```

## 5. Quotes

> A quotation.
>
> > A nested quotation.

## 6. Tables

| Feature | Supported | Notes |
|---------|-----------|-------|
| Headings | ✅ | H1-H6 |
| Lists | ✅ | Ordered and unordered |
| Code | ✅ | Inline and blocks |

## 7. Links and images

[GitHub](https://github.com)

![Example image](https://via.placeholder.com/600x300)

---

## 8. Other elements

<kbd>Ctrl</kbd> + <kbd>C</kbd> to copy"#;

const ARTICLE: &str = r#"# Writing a great technical article

> Tips and good habits for technical writing

## 📋 Introduction

Writing is an important skill, especially for engineers. A good technical article helps others and sharpens your own understanding.

## 🎯 Key points

### 1. Know your reader

Before you start, ask:
- How experienced are the readers?
- What problem are they trying to solve?
- How much background do they need?

### 2. Clear structure

A solid outline:

1. **Introduction** - state the purpose
2. **Body** - develop the content
3. **Examples** - show real cases
4. **Summary** - recap the key points

### 3. Code samples

```javascript
// A good code sample is:
// 1. short
// 2. commented where it matters
// 3. runnable as-is

function example() {
  console.log("Hello, World!");
}
```

## 💡 Techniques

| Technique | Meaning | Importance |
|-----------|---------|------------|
| Concise | No filler | ⭐⭐⭐⭐⭐ |
| Accurate | Correct details | ⭐⭐⭐⭐⭐ |
| Readable | Comfortable layout | ⭐⭐⭐⭐ |

## 📝 Practice

> **Tip**: reread your draft from the reader's point of view.

- ✅ Organize with heading levels
- ✅ Use lists and tables where they help
- ✅ Include code samples
- ❌ Avoid walls of text
- ❌ Don't assume the reader knows every concept

## 🎉 Summary

1. A clear goal
2. A clear structure
3. Practical examples
4. A readable layout

---

*Written in Markdown, rendered in a social publishing style*"#;

const CODE: &str = r#"# API reference

## 📖 Overview

An example reference for a RESTful API.

## 🚀 Getting started

### Install

```bash
npm install example-api
# or
yarn add example-api
```

### Basic usage

```javascript
import { ApiClient } from 'example-api';

const client = new ApiClient({
  apiKey: 'your-api-key',
  baseUrl: 'https://api.example.com'
});
```

## 📡 Endpoints

### 1. Get a user

**Request:**
```http
GET /api/users/:id
```

**Parameters:**
| Name | Type | Required | Description |
|------|------|----------|-------------|
| id | string | ✅ | User id |

**Response:**
```json
{
  "id": "123",
  "name": "Jane Doe",
  "email": "jane@example.com"
}
```

## ⚠️ Errors

| Status | Meaning |
|--------|---------|
| 200 | OK |
| 400 | Bad request |
| 401 | Unauthorized |
| 404 | Not found |
| 500 | Server error |

## 💡 Best practices

> **Tip**: always check the response status

- ✅ Keep API keys in environment variables
- ✅ Retry failed requests
- ✅ Set request timeouts
- ❌ Never ship keys to the client

---

**Version:** 1.0.0"#;

/// Names of the loadable example documents, in menu order.
pub const SAMPLE_NAMES: [&str; 4] = ["basic", "full", "article", "code"];

/// Look up an example document by name.
pub fn sample(name: &str) -> Option<&'static str> {
    match name {
        "basic" => Some(BASIC),
        "full" => Some(FULL),
        "article" => Some(ARTICLE),
        "code" => Some(CODE),
        _ => None,
    }
}
