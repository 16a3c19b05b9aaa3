// Prompt for the insights report. The HTML skeleton below is what `html::extract_html`
// later cuts back out of the model reply, so the `<body>` markers must stay intact.

pub const CONSULTANCY_NAME: &str = "Daley Mottley AI Consulting";
pub const CONTACT_ADDRESS: &str = "daley.mottley@hotmail.com";

/// Builds the report instruction for a client in `industry`.
///
/// `answers` are the three questionnaire answers, in order: data management challenges,
/// technology integration inefficiencies, long-term goals.
pub fn build_prompt(industry: &str, answers: &[String; 3]) -> String {
    format!(
        r#"You are an AI consultant preparing a comprehensive report for a business owner in the {industry} industry. The report must be detailed, insightful, and structured into the following sections:

1. **Introduction**: Provide a brief overview of the business's context based on the industry.
2. **Industry Trends**: Provide the latest AI trends in the {industry} industry.
3. **AI Solutions**: Offer AI-driven solutions for the following business needs:
    - Current data management and utilization challenges: {data}
    - Areas of technology integration and inefficiency: {integration}
    - Long-term business goals and AI's role in achieving them: {goals}
4. **Analysis and Recommendations**:
    - Include a detailed analysis of how AI can address the specific challenges mentioned.
    - Offer actionable recommendations for AI implementation.
5. **Conclusion**: Summarize the key insights and recommend next steps.

Ensure the report is structured professionally, with clear headings and well-organized content. Also, include a call-to-action encouraging the business owner to engage with {firm} for further AI consulting services.

The report should be in the following format embedded in HTML code with the brackets filled in with the appropriate content:

## Format
```
<body>
    <header>
        <img src="{{ url_for('static', filename='images/logo.png') }}" alt="{firm}">
        <h1>AI Insights Report</h1>
    </header>

    <div class="container">
        <section>
            <h2>Introduction</h2>
            <p>{{ introduction }}</p>
        </section>

        <section>
            <h2>Industry Trends</h2>
            <p>{{ industry_trends }}</p>
        </section>

        <section>
            <h2>AI Solutions</h2>
            <p>{{ ai_solutions }}</p>
        </section>

        <section>
            <h2>Analysis</h2>
            <p>{{ analysis }}</p>
        </section>

        <section>
            <h2>Conclusion</h2>
            <p>{{ conclusion }}</p>
        </section>

        <section class="cta">
            <h2>Ready to Implement AI in Your Business?</h2>
            <p>Contact {firm} for expert guidance on how AI can transform your business. Let us help you stay ahead of the competition with cutting-edge AI solutions.</p>
            <a href="{contact}">Contact Us Today</a>
        </section>
    </div>

    <footer>
        <p>{firm} | All Rights Reserved &copy; {{ current_year }}</p>
    </footer>
</body>
```
"#,
        industry = industry,
        data = answers[0],
        integration = answers[1],
        goals = answers[2],
        firm = CONSULTANCY_NAME,
        contact = CONTACT_ADDRESS,
    )
}
